//! Configuration error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::util::diagnostic::{suggestions, Diagnostic};

/// Error while resolving a build configuration.
///
/// Every variant is fatal: the build cannot proceed without a complete,
/// valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum ConfigError {
    #[error("unsupported platform `{platform}`")]
    #[diagnostic(code(hpcbuild::config::unsupported_platform))]
    UnsupportedPlatform {
        platform: String,
        supported: Vec<String>,
    },

    #[error("invalid value `{value}` for option `{name}`")]
    #[diagnostic(code(hpcbuild::config::invalid_option))]
    InvalidOption {
        name: String,
        value: String,
        allowed: Vec<String>,
    },

    #[error("unrecognized compiler `{compiler}`")]
    #[diagnostic(code(hpcbuild::flags::unrecognized_compiler))]
    UnrecognizedCompiler {
        compiler: String,
        known: Vec<String>,
    },

    #[error("no `{group}` flag group for compiler `{identity}`")]
    #[diagnostic(code(hpcbuild::flags::missing_flag_group))]
    MissingFlagGroup { identity: String, group: String },
}

impl ConfigError {
    /// Name of the option an `InvalidOption` error refers to.
    pub fn option_name(&self) -> Option<&str> {
        match self {
            ConfigError::InvalidOption { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ConfigError::UnsupportedPlatform {
                platform,
                supported,
            } => Diagnostic::error(format!("platform `{}` is not supported", platform))
                .with_context(format!("supported platforms: {}", supported.join(", ")))
                .with_suggestion(format!(
                    "Pass the platform explicitly, e.g. `PLATFORM={}`",
                    supported.first().map(String::as_str).unwrap_or("linux")
                )),

            ConfigError::InvalidOption {
                name,
                value,
                allowed,
            } => Diagnostic::error(format!(
                "option `{}` does not accept the value `{}`",
                name, value
            ))
            .with_context(format!("allowed values: {}", allowed.join(", ")))
            .with_suggestion(format!("Set `{}` to one of the allowed values", name))
            .with_suggestion(suggestions::LIST_OPTIONS),

            ConfigError::UnrecognizedCompiler { compiler, known } => {
                Diagnostic::error(format!("cannot classify compiler `{}`", compiler))
                    .with_context(format!("known compiler names: {}", known.join(", ")))
                    .with_suggestion("Set `CC` to a known compiler".to_string())
                    .with_suggestion(suggestions::COMPILER_ALIAS)
            }

            ConfigError::MissingFlagGroup { identity, group } => Diagnostic::error(format!(
                "flag table for `{}` has no `{}` group",
                identity, group
            ))
            .with_suggestion(format!(
                "Define `{}` under `[flags.\"{}\"]` in .hpcbuild/config.toml",
                group, identity
            )),
        }
    }
}
