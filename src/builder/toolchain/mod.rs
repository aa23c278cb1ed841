//! Compiler identities, alias normalization and flag tables.
//!
//! A raw compiler executable name (e.g. `/usr/bin/gcc-12`) is normalized
//! to a [`CompilerIdentity`] by scanning an ordered alias table, and the
//! identity selects a set of flag groups from the [`FlagTable`].

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

mod alias;
mod flag_table;

pub use alias::{AliasTable, CompilerMatch};
pub use flag_table::{FlagTable, FLAG_GROUPS};

/// Normalized compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CompilerIdentity {
    /// GNU compilers (gcc, g++, gfortran)
    #[serde(rename = "g++")]
    Gnu,
    /// Generic system `cc`/`c++` driver
    #[serde(rename = "c++")]
    System,
    /// Clang/LLVM
    #[serde(rename = "clang++")]
    Clang,
    /// Intel classic compilers
    #[serde(rename = "icpc")]
    Intel,
    /// Sunway GNU-based compilers
    #[serde(rename = "swg++")]
    Sunway,
}

impl CompilerIdentity {
    /// All identities.
    pub const ALL: [CompilerIdentity; 5] = [
        CompilerIdentity::Gnu,
        CompilerIdentity::System,
        CompilerIdentity::Clang,
        CompilerIdentity::Intel,
        CompilerIdentity::Sunway,
    ];

    /// Get the identity tag (e.g., "g++").
    pub fn as_str(&self) -> &'static str {
        match self {
            CompilerIdentity::Gnu => "g++",
            CompilerIdentity::System => "c++",
            CompilerIdentity::Clang => "clang++",
            CompilerIdentity::Intel => "icpc",
            CompilerIdentity::Sunway => "swg++",
        }
    }
}

impl std::str::FromStr for CompilerIdentity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CompilerIdentity::ALL
            .iter()
            .copied()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "unknown compiler identity '{}', valid values: g++, c++, clang++, icpc, swg++",
                    s
                )
            })
    }
}

impl fmt::Display for CompilerIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A command template handed to the external build tool.
///
/// Arguments may contain build-tool placeholders such as `$TARGET`,
/// `$SOURCES` and `$_CPPINCFLAGS`, which are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandSpec {
    /// The program to run (e.g., "sw5gcc")
    pub program: PathBuf,
    /// Command arguments
    pub args: Vec<String>,
}

impl CommandSpec {
    /// Create a new command spec.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        CommandSpec {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Add an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Add multiple arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(|a| a.into()));
        self
    }

    /// Render as a single command line.
    pub fn to_command_line(&self) -> String {
        let mut line = self.program.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_command_line())
    }
}
