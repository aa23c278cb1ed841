//! Site configuration files.
//!
//! hpcbuild reads up to three configuration layers:
//! - Global: `~/.hpcbuild/config.toml` - user-wide defaults
//! - Project: `<project>/.hpcbuild/config.toml` - project settings
//! - Explicit: the file passed with `--config`
//!
//! Later layers take precedence; `KEY=VALUE` arguments on the command line
//! override all of them.
//!
//! ```toml
//! [variables]
//! PLATFORM = "linux"
//! BUILD_TYPE = "Debug"
//!
//! [compiler]
//! fallback = "g++"
//! aliases = [{ key = "nvc", identity = "clang++" }]
//!
//! [flags."icpc"]
//! warnings = "-w2"
//!
//! [thirdparty]
//! utilities = "/opt/utilities"
//!
//! [[target]]
//! name = "solver"
//! kind = "app"
//! sources = ["apps/solver/main.cpp"]
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::builder::target::TargetSpec;
use crate::builder::toolchain::{AliasTable, CompilerIdentity, FlagTable};
use crate::core::options::RawOptions;
use crate::core::thirdparty::ThirdPartyConfig;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// hpcbuild configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build variable values (same names as on the command line)
    pub variables: RawOptions,

    /// Compiler classification settings
    pub compiler: CompilerConfig,

    /// Flag group overrides, keyed by compiler identity then group name
    pub flags: BTreeMap<String, BTreeMap<String, String>>,

    /// Third-party library locations
    pub thirdparty: ThirdPartyConfig,

    /// Build targets
    #[serde(rename = "target")]
    pub targets: Vec<TargetSpec>,
}

/// Compiler classification settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompilerConfig {
    /// Identity used when no alias matches the C compiler
    pub fallback: Option<String>,

    /// Extra aliases, checked before the built-in ones
    pub aliases: Vec<AliasEntry>,
}

/// One extra compiler alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasEntry {
    /// Substring to look for in the compiler basename
    pub key: String,
    /// Identity tag (`g++`, `c++`, `clang++`, `icpc` or `swg++`)
    pub identity: String,
}

/// A configuration file that exists but cannot be read or parsed.
#[derive(Debug, thiserror::Error)]
#[error("failed to {action} config file: {}", path.display())]
pub struct ConfigFileError {
    pub path: PathBuf,
    pub action: &'static str,
    pub reason: String,
}

impl ConfigFileError {
    /// Convert to a user-facing diagnostic pointing at the file.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(format!("failed to {} config file", self.action))
            .with_location(&self.path)
            .with_context(self.reason.trim_end())
            .with_suggestion(suggestions::CHECK_CONFIG)
    }
}

fn parse_identity(tag: &str) -> Result<CompilerIdentity> {
    tag.parse::<CompilerIdentity>().map_err(|e| anyhow!(e))
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self, ConfigFileError> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigFileError {
            path: path.to_path_buf(),
            action: "read",
            reason: e.to_string(),
        })?;

        toml::from_str(&contents).map_err(|e| ConfigFileError {
            path: path.to_path_buf(),
            action: "parse",
            reason: e.to_string(),
        })
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        self.variables.merge(&other.variables);

        if other.compiler.fallback.is_some() {
            self.compiler.fallback = other.compiler.fallback;
        }
        // Aliases from the overriding layer are checked first
        let mut aliases = other.compiler.aliases;
        aliases.append(&mut self.compiler.aliases);
        self.compiler.aliases = aliases;

        for (identity, groups) in other.flags {
            self.flags.entry(identity).or_default().extend(groups);
        }

        self.thirdparty.merge(other.thirdparty);

        if !other.targets.is_empty() {
            self.targets = other.targets;
        }
    }

    /// The alias table: configured aliases, then the built-in ones.
    pub fn alias_table(&self) -> Result<AliasTable> {
        let mut table = AliasTable::builtin();

        let extra = self
            .compiler
            .aliases
            .iter()
            .map(|a| {
                if a.key.is_empty() {
                    return Err(anyhow!("compiler alias for `{}` has an empty key", a.identity));
                }
                parse_identity(&a.identity)
                    .map(|id| (a.key.clone(), id))
                    .with_context(|| format!("invalid identity for compiler alias `{}`", a.key))
            })
            .collect::<Result<Vec<_>>>()?;
        table.prepend(extra);

        let fallback = self
            .compiler
            .fallback
            .as_deref()
            .map(parse_identity)
            .transpose()
            .context("invalid `compiler.fallback`")?;
        table.set_fallback(fallback);

        Ok(table)
    }

    /// The built-in flag table with configured overrides applied.
    pub fn flag_table(&self) -> Result<FlagTable> {
        let mut table = FlagTable::builtin();
        for (identity, groups) in &self.flags {
            let identity = parse_identity(identity)
                .with_context(|| format!("invalid `[flags.\"{}\"]` section", identity))?;
            for (group, flags) in groups {
                table.set(identity, group.clone(), flags.clone());
            }
        }
        Ok(table)
    }
}

/// Load merged configuration from the global, project and explicit layers.
///
/// Missing global/project files are skipped. Any layer file that exists
/// but cannot be read or parsed is an error, as is a missing explicit file.
pub fn load_config(global_path: Option<&Path>, project_path: &Path, explicit: Option<&Path>) -> Result<Config> {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            tracing::debug!("loading global config {}", global_path.display());
            config.merge(Config::load(global_path)?);
        }
    }

    if project_path.exists() {
        tracing::debug!("loading project config {}", project_path.display());
        config.merge(Config::load(project_path)?);
    }

    if let Some(path) = explicit {
        tracing::debug!("loading explicit config {}", path.display());
        config.merge(Config::load(path)?);
    }

    Ok(config)
}
