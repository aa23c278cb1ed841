//! Compiler alias table.

use serde::Serialize;

use crate::core::errors::ConfigError;
use crate::core::paths::executable_basename;

use super::CompilerIdentity;

/// Built-in aliases in match priority order.
///
/// Order matters: the first key contained in the executable name wins, so
/// `sw5gcc` resolves through `gcc` and `icc` through `cc`.
const BUILTIN_ALIASES: &[(&str, CompilerIdentity)] = &[
    ("gfortran", CompilerIdentity::Gnu),
    ("gcc", CompilerIdentity::Gnu),
    ("g++", CompilerIdentity::Gnu),
    ("cc", CompilerIdentity::System),
    ("c++", CompilerIdentity::System),
    ("clang", CompilerIdentity::Clang),
    ("clang++", CompilerIdentity::Clang),
    ("icc", CompilerIdentity::Intel),
    ("ifort", CompilerIdentity::Intel),
    ("icpc", CompilerIdentity::Intel),
    ("sw5gcc", CompilerIdentity::Sunway),
    ("sw5g++", CompilerIdentity::Sunway),
    ("sw5gfortran", CompilerIdentity::Sunway),
];

/// Result of normalizing a compiler executable name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilerMatch {
    /// Basename that was scanned
    pub basename: String,
    /// Alias key that matched
    pub alias: String,
    pub identity: CompilerIdentity,
}

/// Ordered substring table mapping compiler names to identities.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    entries: Vec<(String, CompilerIdentity)>,
    fallback: Option<CompilerIdentity>,
}

impl Default for AliasTable {
    fn default() -> Self {
        AliasTable::builtin()
    }
}

impl AliasTable {
    /// The built-in table, with no fallback.
    pub fn builtin() -> Self {
        AliasTable {
            entries: BUILTIN_ALIASES
                .iter()
                .map(|(k, id)| (k.to_string(), *id))
                .collect(),
            fallback: None,
        }
    }

    /// Put extra aliases in front of the existing ones, keeping their order.
    pub fn prepend(&mut self, aliases: impl IntoIterator<Item = (String, CompilerIdentity)>) {
        let mut entries: Vec<_> = aliases.into_iter().collect();
        entries.append(&mut self.entries);
        self.entries = entries;
    }

    /// Identity to use when no alias matches.
    pub fn set_fallback(&mut self, fallback: Option<CompilerIdentity>) {
        self.fallback = fallback;
    }

    /// Alias keys in priority order.
    pub fn keys(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }

    /// Normalize a compiler executable (name or path) to an identity.
    ///
    /// Scans the basename against each alias key in order and stops at the
    /// first key that is a substring of it.
    pub fn normalize(&self, compiler: &str) -> Result<CompilerMatch, ConfigError> {
        let basename = executable_basename(compiler);

        let hit = self
            .entries
            .iter()
            .find(|(key, _)| basename.contains(key.as_str()));

        if let Some((alias, identity)) = hit {
            tracing::debug!("compiler `{}` matched alias `{}` -> {}", basename, alias, identity);
            return Ok(CompilerMatch {
                basename: basename.to_string(),
                alias: alias.clone(),
                identity: *identity,
            });
        }

        match self.fallback {
            Some(identity) => {
                tracing::warn!(
                    "compiler `{}` matches no known alias, falling back to {}",
                    basename,
                    identity
                );
                Ok(CompilerMatch {
                    basename: basename.to_string(),
                    alias: String::new(),
                    identity,
                })
            }
            None => Err(ConfigError::UnrecognizedCompiler {
                compiler: basename.to_string(),
                known: self.keys(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: &str) -> CompilerIdentity {
        AliasTable::builtin().normalize(name).unwrap().identity
    }

    #[test]
    fn test_versioned_gnu_compiler() {
        let m = AliasTable::builtin().normalize("g++-11").unwrap();
        assert_eq!(m.alias, "g++");
        assert_eq!(m.identity, CompilerIdentity::Gnu);
        assert_eq!(m.identity.as_str(), "g++");
    }

    #[test]
    fn test_gnu_family_front_ends() {
        assert_eq!(identity("gcc"), CompilerIdentity::Gnu);
        assert_eq!(identity("gfortran"), CompilerIdentity::Gnu);
        assert_eq!(identity("x86_64-linux-gnu-gcc-12"), CompilerIdentity::Gnu);
        assert_eq!(identity("/usr/local/bin/gcc"), CompilerIdentity::Gnu);
    }

    #[test]
    fn test_other_families() {
        assert_eq!(identity("clang"), CompilerIdentity::Clang);
        assert_eq!(identity("clang-15"), CompilerIdentity::Clang);
        assert_eq!(identity("icpc"), CompilerIdentity::Intel);
        assert_eq!(identity("ifort"), CompilerIdentity::Intel);
        assert_eq!(identity("c++"), CompilerIdentity::System);
    }

    #[test]
    fn test_first_match_wins_on_overlapping_keys() {
        // `gcc` precedes `sw5gcc`, `cc` precedes `icc`
        let m = AliasTable::builtin().normalize("sw5gcc").unwrap();
        assert_eq!(m.alias, "gcc");
        assert_eq!(m.identity, CompilerIdentity::Gnu);

        let m = AliasTable::builtin().normalize("icc").unwrap();
        assert_eq!(m.alias, "cc");
        assert_eq!(m.identity, CompilerIdentity::System);

        assert_eq!(identity("mpicc"), CompilerIdentity::System);
        assert_eq!(identity("sw5g++"), CompilerIdentity::Gnu);
        // `clang++` contains `g++`
        assert_eq!(identity("clang++"), CompilerIdentity::Gnu);
    }

    #[test]
    fn test_unrecognized_compiler() {
        let err = AliasTable::builtin().normalize("/opt/ibm/xlf").unwrap_err();
        match err {
            ConfigError::UnrecognizedCompiler { compiler, known } => {
                assert_eq!(compiler, "xlf");
                assert_eq!(known.first().map(String::as_str), Some("gfortran"));
                assert_eq!(known.len(), 13);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_fallback_identity() {
        let mut table = AliasTable::builtin();
        table.set_fallback(Some(CompilerIdentity::Gnu));

        let m = table.normalize("xlf").unwrap();
        assert_eq!(m.identity, CompilerIdentity::Gnu);
        assert!(m.alias.is_empty());
    }

    #[test]
    fn test_prepended_aliases_take_priority() {
        let mut table = AliasTable::builtin();
        table.prepend([("sw5gcc".to_string(), CompilerIdentity::Sunway)]);

        let m = table.normalize("sw5gcc").unwrap();
        assert_eq!(m.identity, CompilerIdentity::Sunway);
        assert_eq!(table.keys()[0], "sw5gcc");
        assert_eq!(table.keys()[1], "gfortran");
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let table = AliasTable::builtin();
        for name in ["g++-11", "icc", "clang++", "sw5gfortran"] {
            assert_eq!(table.normalize(name).unwrap(), table.normalize(name).unwrap());
        }
    }
}
