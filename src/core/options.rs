//! Typed build options.
//!
//! Raw user input (`KEY=VALUE` arguments, site config tables) is kept as
//! [`RawOptions`] until the schema resolver turns it into an [`OptionSet`].

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::platform::Platform;

/// A fixed set of allowed values for an enumerated option.
pub trait Choice: Sized + Copy + 'static {
    /// All values, in the order they are declared in the schema.
    const VALUES: &'static [Self];

    /// The value as written in build variables.
    fn as_str(&self) -> &'static str;

    /// Allowed values as strings, for error messages.
    fn allowed_values() -> Vec<String> {
        Self::VALUES.iter().map(|v| v.as_str().to_string()).collect()
    }

    /// Parse an exact (case-sensitive) match, or fail naming the option.
    fn parse_choice(name: &str, value: &str) -> Result<Self, ConfigError> {
        Self::VALUES
            .iter()
            .copied()
            .find(|v| v.as_str() == value)
            .ok_or_else(|| ConfigError::InvalidOption {
                name: name.to_string(),
                value: value.to_string(),
                allowed: Self::allowed_values(),
            })
    }
}

/// Type of build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildType {
    Opt,
    Debug,
    Prof,
}

impl BuildType {
    /// Name of the flag group holding this build type's flags.
    pub fn flag_group(&self) -> &'static str {
        match self {
            BuildType::Opt => "opt",
            BuildType::Debug => "debug",
            BuildType::Prof => "prof",
        }
    }
}

impl Choice for BuildType {
    const VALUES: &'static [Self] = &[BuildType::Opt, BuildType::Debug, BuildType::Prof];

    fn as_str(&self) -> &'static str {
        match self {
            BuildType::Opt => "Opt",
            BuildType::Debug => "Debug",
            BuildType::Prof => "Prof",
        }
    }
}

/// Target architecture word size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildArch {
    #[serde(rename = "64")]
    Bits64,
    #[serde(rename = "32")]
    Bits32,
}

impl Choice for BuildArch {
    const VALUES: &'static [Self] = &[BuildArch::Bits64, BuildArch::Bits32];

    fn as_str(&self) -> &'static str {
        match self {
            BuildArch::Bits64 => "64",
            BuildArch::Bits32 => "32",
        }
    }
}

/// Floating point precision of the numerical kernels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Precision {
    /// Double precision
    DP,
    /// Single precision
    SP,
}

impl Choice for Precision {
    const VALUES: &'static [Self] = &[Precision::DP, Precision::SP];

    fn as_str(&self) -> &'static str {
        match self {
            Precision::DP => "DP",
            Precision::SP => "SP",
        }
    }
}

/// Width of the label integer or scalar float types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Width {
    #[serde(rename = "32")]
    W32,
    #[serde(rename = "64")]
    W64,
}

impl Choice for Width {
    const VALUES: &'static [Self] = &[Width::W32, Width::W64];

    fn as_str(&self) -> &'static str {
        match self {
            Width::W32 => "32",
            Width::W64 => "64",
        }
    }
}

/// How libraries are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibType {
    Shared,
    Static,
    Object,
}

impl Choice for LibType {
    const VALUES: &'static [Self] = &[LibType::Shared, LibType::Static, LibType::Object];

    fn as_str(&self) -> &'static str {
        match self {
            LibType::Shared => "shared",
            LibType::Static => "static",
            LibType::Object => "object",
        }
    }
}

macro_rules! impl_display_for_choice {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

impl_display_for_choice!(BuildType, BuildArch, Precision, Width, LibType);

/// A raw option value as supplied by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    Bool(bool),
    Int(i64),
    Text(String),
}

impl RawValue {
    /// The value as a string (booleans become `true`/`false`).
    pub fn as_text(&self) -> String {
        match self {
            RawValue::Bool(b) => b.to_string(),
            RawValue::Int(i) => i.to_string(),
            RawValue::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for RawValue {
    fn from(s: &str) -> Self {
        RawValue::Text(s.to_string())
    }
}

impl From<String> for RawValue {
    fn from(s: String) -> Self {
        RawValue::Text(s)
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Bool(b)
    }
}

/// Raw option name to value mapping. Later inserts override earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RawOptions {
    values: BTreeMap<String, RawValue>,
}

impl RawOptions {
    /// Create an empty set of raw options.
    pub fn new() -> Self {
        RawOptions::default()
    }

    /// Set an option, replacing any previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Builder-style variant of [`RawOptions::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.set(name, value);
        self
    }

    /// Look up an option.
    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.values.get(name)
    }

    /// Overlay `other` on top of this set (other takes precedence).
    pub fn merge(&mut self, other: &RawOptions) {
        for (k, v) in &other.values {
            self.values.insert(k.clone(), v.clone());
        }
    }

    /// Iterate over option names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parse command-line style `KEY=VALUE` assignments.
    pub fn from_assignments<I, S>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut raw = RawOptions::new();
        for arg in args {
            let arg = arg.as_ref();
            let (key, value) = arg
                .split_once('=')
                .ok_or_else(|| format!("expected KEY=VALUE, got `{}`", arg))?;
            let key = key.trim();
            if key.is_empty() {
                return Err(format!("missing option name in `{}`", arg));
            }
            raw.set(key, value);
        }
        Ok(raw)
    }
}

/// Compiler and linker executables for the default pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompilerSet {
    pub cc: String,
    pub cxx: String,
    pub f90: String,
    pub cxx_linker: String,
    pub f_linker: String,
}

/// MPI library location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MpiSettings {
    /// Library name passed to the linker (without `-l`)
    pub lib_name: String,
    pub inc_path: PathBuf,
    pub lib_path: PathBuf,
}

impl MpiSettings {
    /// Whether the MPI implementation is MPICH (by library name).
    pub fn is_mpich(&self) -> bool {
        self.lib_name.to_lowercase().contains("mpich")
    }
}

/// Options only present on the accelerator platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceleratorOptions {
    /// Offload threading (ATHREAD) enabled
    pub athread: bool,
    pub cc_host: String,
    pub cc_slave: String,
    pub cxx_host: String,
}

/// A fully validated set of build options.
///
/// Constructed once per invocation by
/// [`resolve_options`](crate::core::schema::resolve_options) and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionSet {
    pub platform: Platform,
    pub build_type: BuildType,
    pub build_arch: BuildArch,
    pub precision: Precision,
    pub int_type: Width,
    pub float_type: Width,
    pub omp: bool,
    pub lib_type: LibType,
    pub verbose: bool,
    pub compilers: CompilerSet,
    pub mpi: MpiSettings,
    /// Present iff the platform is the accelerator platform
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accelerator: Option<AcceleratorOptions>,
    /// Supplied option names that no declaration matched
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unknown: Vec<String>,
}

impl OptionSet {
    /// Whether the host/slave offload pipelines are enabled.
    pub fn offload_enabled(&self) -> bool {
        self.accelerator.as_ref().is_some_and(|a| a.athread)
    }
}
