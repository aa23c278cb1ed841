//! Per-compiler flag groups.

use std::collections::BTreeMap;

use crate::core::errors::ConfigError;
use crate::core::options::BuildType;

use super::CompilerIdentity;

/// Every group a complete table must define.
pub const FLAG_GROUPS: [&str; 5] = ["general", "warnings", "debug", "prof", "opt"];

const GENERAL: &str = "-fPIC -rdynamic";
const DEBUG: &str = "-O0 -ggdb3 -DDEBUG -DTIMERS";
const PROF: &str = "-O2 -pg";
const OPT: &str = "-O3 -g";
const INTEL_WARNINGS: &str = "-wd327,654,819,1125,1476,1505,1572";

/// Flag strings by compiler identity and group name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagTable {
    groups: BTreeMap<CompilerIdentity, BTreeMap<String, String>>,
}

impl FlagTable {
    /// An empty table.
    pub fn new() -> Self {
        FlagTable::default()
    }

    /// The built-in table covering every identity.
    pub fn builtin() -> Self {
        let mut table = FlagTable::new();
        for identity in CompilerIdentity::ALL {
            let warnings = match identity {
                CompilerIdentity::Intel => INTEL_WARNINGS,
                _ => "",
            };
            table.set(identity, "general", GENERAL);
            table.set(identity, "warnings", warnings);
            table.set(identity, "debug", DEBUG);
            table.set(identity, "prof", PROF);
            table.set(identity, "opt", OPT);
        }
        table
    }

    /// Set (or replace) one flag group.
    pub fn set(&mut self, identity: CompilerIdentity, group: impl Into<String>, flags: impl Into<String>) {
        self.groups
            .entry(identity)
            .or_default()
            .insert(group.into(), flags.into());
    }

    /// Look up one flag group.
    pub fn group(&self, identity: CompilerIdentity, group: &str) -> Result<&str, ConfigError> {
        self.groups
            .get(&identity)
            .and_then(|g| g.get(group))
            .map(String::as_str)
            .ok_or_else(|| ConfigError::MissingFlagGroup {
                identity: identity.to_string(),
                group: group.to_string(),
            })
    }

    /// The general, warnings and build-type groups, in that order.
    pub fn groups_for(
        &self,
        identity: CompilerIdentity,
        build_type: BuildType,
    ) -> Result<Vec<&str>, ConfigError> {
        ["general", "warnings", build_type.flag_group()]
            .iter()
            .map(|g| self.group(identity, g))
            .collect()
    }

    /// The concatenated flag string for an identity and build type.
    ///
    /// Groups are joined by single spaces; empty groups are skipped.
    pub fn flags_for(&self, identity: CompilerIdentity, build_type: BuildType) -> Result<String, ConfigError> {
        let groups = self.groups_for(identity, build_type)?;
        Ok(groups
            .iter()
            .map(|g| g.trim())
            .filter(|g| !g.is_empty())
            .collect::<Vec<_>>()
            .join(" "))
    }
}
