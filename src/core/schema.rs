//! Build variable schema.
//!
//! Declares the recognized build options (common and per-platform) and
//! resolves user-supplied raw values into a typed [`OptionSet`].
//!
//! Resolution never returns a partial option set: the first invalid value
//! aborts with a [`ConfigError`].

use std::path::PathBuf;

use serde::Serialize;

use super::errors::ConfigError;
use super::options::{
    AcceleratorOptions, BuildArch, BuildType, Choice, CompilerSet, LibType, MpiSettings,
    OptionSet, Precision, RawOptions, RawValue, Width,
};
use super::platform::{host_os_tag, Platform};

/// Semantic type of a build option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OptionKind {
    /// One of a fixed set of values
    Enum { allowed: Vec<String> },
    /// Boolean toggle
    Bool,
    /// Filesystem directory
    Path,
    /// Free-form text (executable names, library names)
    Text,
}

/// Declaration of a single build option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionDecl {
    pub name: &'static str,
    pub help: &'static str,
    #[serde(flatten)]
    pub kind: OptionKind,
    pub default: String,
}

impl OptionDecl {
    fn choice<T: Choice>(name: &'static str, help: &'static str, default: T) -> Self {
        OptionDecl {
            name,
            help,
            kind: OptionKind::Enum {
                allowed: T::allowed_values(),
            },
            default: default.as_str().to_string(),
        }
    }

    fn flag(name: &'static str, help: &'static str, default: bool) -> Self {
        OptionDecl {
            name,
            help,
            kind: OptionKind::Bool,
            default: default.to_string(),
        }
    }

    fn path(name: &'static str, help: &'static str, default: &str) -> Self {
        OptionDecl {
            name,
            help,
            kind: OptionKind::Path,
            default: default.to_string(),
        }
    }

    fn text(name: &'static str, help: &'static str, default: &str) -> Self {
        OptionDecl {
            name,
            help,
            kind: OptionKind::Text,
            default: default.to_string(),
        }
    }
}

/// Options recognized on every platform.
pub fn common_options() -> Vec<OptionDecl> {
    vec![
        OptionDecl {
            name: "PLATFORM",
            help: "build platforms",
            kind: OptionKind::Enum {
                allowed: Platform::allowed_values(),
            },
            default: host_os_tag(),
        },
        OptionDecl::choice("BUILD_TYPE", "Type of build", BuildType::Opt),
        OptionDecl::choice("BUILD_ARCH", "Build architecture", BuildArch::Bits64),
        OptionDecl::choice("PRECISION", "Single/Double precision", Precision::DP),
        OptionDecl::choice("INT_TYPE", "Integer size", Width::W32),
        OptionDecl::choice("FLOAT_TYPE", "Float size", Width::W64),
        OptionDecl::flag("OMP", "Use OpenMP multi-threading", false),
        OptionDecl::choice("LIB_TYPE", "library building type", LibType::Static),
        OptionDecl::flag("VERBOSE", "Print verbosely when compiling", false),
    ]
}

/// Options specific to one platform.
pub fn platform_options(platform: Platform) -> Vec<OptionDecl> {
    match platform {
        Platform::Windows => vec![
            OptionDecl::text("CC", "C compiler", "gcc"),
            OptionDecl::text("CXX", "C++ compiler", "g++"),
            OptionDecl::text("F90", "fortran90 compiler", "gfortran"),
            OptionDecl::text("CXX_LINKER", "C++ linker", "g++"),
            OptionDecl::text("F_LINKER", "fortran linker", "gfortran"),
            OptionDecl::text("MPI_LIB_NAME", "MPI library name", "mpi"),
            OptionDecl::path(
                "MPI_INC_PATH",
                "Path to MPI headers",
                r"C:\Program Files\MPICH2\include",
            ),
            OptionDecl::path(
                "MPI_LIB_PATH",
                "Path to MPI libraries",
                r"C:\Program Files\MPICH2\lib",
            ),
        ],
        Platform::Linux => vec![
            OptionDecl::text("CC", "C compiler", "gcc"),
            OptionDecl::text("CXX", "C++ compiler", "g++"),
            OptionDecl::text("F90", "fortran90 compiler", "gfortran"),
            OptionDecl::text("CXX_LINKER", "C++ linker", "mpiicxx"),
            OptionDecl::text("F_LINKER", "fortran linker", "mpiif90"),
            OptionDecl::text("MPI_LIB_NAME", "MPI library name", "mpi"),
            OptionDecl::path(
                "MPI_INC_PATH",
                "Path to MPI headers",
                "/usr/sw-cluster/mpi2/include",
            ),
            OptionDecl::path(
                "MPI_LIB_PATH",
                "Path to MPI libraries",
                "/usr/sw-cluster/mpi2/lib",
            ),
        ],
        Platform::Sw => vec![
            OptionDecl::text("CC_HOST", "c compiler on host", "sw5gcc"),
            OptionDecl::text("CC_SLAVE", "c compiler on slave", "sw5gcc"),
            OptionDecl::text("CXX_HOST", "cxx compiler on host", "sw5g++"),
            OptionDecl::text("CC", "C compiler", "sw5gcc"),
            OptionDecl::text("CXX", "C++ compiler", "sw5g++"),
            OptionDecl::text("F90", "fortran90 compiler", "sw5gfortran"),
            OptionDecl::text("CXX_LINKER", "C++ linker", "mpicxx"),
            OptionDecl::text("F_LINKER", "fortran linker", "mpif90"),
            OptionDecl::text("MPI_LIB_NAME", "MPI library name", "mpi"),
            OptionDecl::path(
                "MPI_INC_PATH",
                "Path to MPI headers",
                "/usr/sw-mpp/swcc/new_compiler_710/mpi_install/include",
            ),
            OptionDecl::path(
                "MPI_LIB_PATH",
                "Path to MPI libraries",
                "/usr/sw-mpp/swcc/new_compiler_710/mpi_install/lib",
            ),
            OptionDecl::flag("ATHREAD", "Use Shenwei multi-threading", false),
        ],
    }
}

/// The full schema for a platform: common options followed by the
/// platform-specific ones.
pub fn schema(platform: Platform) -> Vec<OptionDecl> {
    let mut decls = common_options();
    decls.extend(platform_options(platform));
    decls
}

/// Parse a boolean option the way the build tool does.
pub fn parse_bool(name: &str, value: &RawValue) -> Result<bool, ConfigError> {
    let text = match value {
        RawValue::Bool(b) => return Ok(*b),
        other => other.as_text().to_lowercase(),
    };

    match text.as_str() {
        "y" | "yes" | "t" | "true" | "1" | "on" | "all" => Ok(true),
        "n" | "no" | "f" | "false" | "0" | "off" | "none" => Ok(false),
        _ => Err(ConfigError::InvalidOption {
            name: name.to_string(),
            value: value.as_text(),
            allowed: vec!["true".to_string(), "false".to_string()],
        }),
    }
}

/// Resolves option values against a platform schema.
struct Lookup<'a> {
    raw: &'a RawOptions,
    decls: Vec<OptionDecl>,
}

impl<'a> Lookup<'a> {
    /// The supplied value, or the declared default.
    fn value(&self, name: &str) -> RawValue {
        match self.raw.get(name) {
            Some(v) => v.clone(),
            None => RawValue::Text(
                self.decls
                    .iter()
                    .find(|d| d.name == name)
                    .map(|d| d.default.clone())
                    .unwrap_or_default(),
            ),
        }
    }

    fn text(&self, name: &str) -> String {
        self.value(name).as_text()
    }

    fn choice<T: Choice>(&self, name: &str) -> Result<T, ConfigError> {
        T::parse_choice(name, &self.text(name))
    }

    fn flag(&self, name: &str) -> Result<bool, ConfigError> {
        parse_bool(name, &self.value(name))
    }

    fn path(&self, name: &str) -> PathBuf {
        let path = PathBuf::from(self.text(name));
        if !path.is_dir() {
            tracing::warn!("{} = {} is not an existing directory", name, path.display());
        }
        path
    }

    fn unknown(&self) -> Vec<String> {
        self.raw
            .names()
            .filter(|n| !self.decls.iter().any(|d| d.name == *n))
            .map(str::to_string)
            .collect()
    }
}

/// Resolve raw option values into a validated [`OptionSet`].
///
/// `PLATFORM` is read first (defaulting to the host OS) and selects the
/// platform-specific part of the schema.
pub fn resolve_options(raw: &RawOptions) -> Result<OptionSet, ConfigError> {
    let platform_tag = raw
        .get("PLATFORM")
        .map(RawValue::as_text)
        .unwrap_or_else(host_os_tag);
    let platform = Platform::parse(&platform_tag)?;

    let lookup = Lookup {
        raw,
        decls: schema(platform),
    };

    let unknown = lookup.unknown();
    for name in &unknown {
        tracing::warn!("ignoring unknown build option `{}`", name);
    }

    let compilers = CompilerSet {
        cc: lookup.text("CC"),
        cxx: lookup.text("CXX"),
        f90: lookup.text("F90"),
        cxx_linker: lookup.text("CXX_LINKER"),
        f_linker: lookup.text("F_LINKER"),
    };

    let accelerator = if platform.is_accelerator() {
        Some(AcceleratorOptions {
            athread: lookup.flag("ATHREAD")?,
            cc_host: lookup.text("CC_HOST"),
            cc_slave: lookup.text("CC_SLAVE"),
            cxx_host: lookup.text("CXX_HOST"),
        })
    } else {
        None
    };

    let options = OptionSet {
        platform,
        build_type: lookup.choice("BUILD_TYPE")?,
        build_arch: lookup.choice("BUILD_ARCH")?,
        precision: lookup.choice("PRECISION")?,
        int_type: lookup.choice("INT_TYPE")?,
        float_type: lookup.choice("FLOAT_TYPE")?,
        omp: lookup.flag("OMP")?,
        lib_type: lookup.choice("LIB_TYPE")?,
        verbose: lookup.flag("VERBOSE")?,
        compilers,
        mpi: MpiSettings {
            lib_name: lookup.text("MPI_LIB_NAME"),
            inc_path: lookup.path("MPI_INC_PATH"),
            lib_path: lookup.path("MPI_LIB_PATH"),
        },
        accelerator,
        unknown,
    };

    tracing::debug!(
        "resolved options for {} ({} {})",
        options.platform,
        options.compilers.cc,
        options.build_type
    );

    Ok(options)
}
