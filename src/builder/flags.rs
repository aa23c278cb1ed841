//! Compiler settings assembly.
//!
//! Combines the option set, the derived paths and the flag table into the
//! flags, include paths and library paths of the default pipeline.
//!
//! Compile flags are assembled in a fixed order:
//!
//! 1. `-DLABEL_INT<int>`
//! 2. `-DSCALAR_FLOAT<float>`
//! 3. `-DWM_<precision>`
//! 4. `general` group
//! 5. `warnings` group
//! 6. build-type group (`opt`, `debug` or `prof`)
//! 7. platform additions (`-DSW_SLAVE`, `-mieee` on the accelerator)
//! 8. MPI C++ binding suppression define

use std::path::PathBuf;

use serde::Serialize;

use crate::core::errors::ConfigError;
use crate::core::options::{Choice, OptionSet};
use crate::core::paths::DerivedPaths;
use crate::core::platform::Platform;

use super::toolchain::{AliasTable, CompilerMatch, FlagTable};

/// Extra Fortran flags so gfortran runs the preprocessor.
pub const FORTRAN_EXTRA_FLAGS: [&str; 2] = ["-cpp", "-fcray-pointer"];

/// Everything the default compile/link pipeline needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompilerSettings {
    /// How the C compiler was classified
    pub compiler: CompilerMatch,
    /// C/C++ compile flags, in assembly order
    pub ccflags: Vec<String>,
    /// Fortran compile flags (compile flags plus preprocessor switches)
    pub f90flags: Vec<String>,
    /// C/C++ include search path
    pub cpppath: Vec<PathBuf>,
    /// Fortran include search path
    pub f90path: Vec<PathBuf>,
    /// Fortran module output directory
    pub fortran_module_dir: PathBuf,
    /// Library search path for every target
    pub libpath_common: Vec<PathBuf>,
    /// Extra library search path for applications
    pub libpath_apps: Vec<PathBuf>,
    /// Extra library search path for libraries
    pub libpath_libs: Vec<PathBuf>,
    /// Plain library search path (only used on Windows for MPI)
    pub libpath: Vec<PathBuf>,
    /// Libraries linked into every target
    pub libs: Vec<String>,
}

impl CompilerSettings {
    /// Compile flags as a single space-separated string.
    pub fn ccflags_string(&self) -> String {
        self.ccflags.join(" ")
    }

    /// Fortran flags as a single space-separated string.
    pub fn f90flags_string(&self) -> String {
        self.f90flags.join(" ")
    }
}

/// Preprocessor defines for the label and scalar widths and the precision.
pub fn width_defines(options: &OptionSet) -> [String; 3] {
    [
        format!("-DLABEL_INT{}", options.int_type.as_str()),
        format!("-DSCALAR_FLOAT{}", options.float_type.as_str()),
        format!("-DWM_{}", options.precision.as_str()),
    ]
}

/// Platform-specific compile flags.
pub fn platform_flags(options: &OptionSet) -> Vec<String> {
    let mut flags = Vec::new();
    if options.platform == Platform::Sw {
        if options.offload_enabled() {
            flags.push("-DSW_SLAVE".to_string());
        }
        flags.push("-mieee".to_string());
    }
    flags
}

/// The define disabling the MPI C++ bindings for the configured MPI.
pub fn mpi_define(options: &OptionSet) -> &'static str {
    if options.mpi.is_mpich() {
        "-DMPICH_SKIP_MPICXX"
    } else {
        "-DOMPI_SKIP_MPICXX"
    }
}

/// Assemble the compiler settings for the default pipeline.
pub fn resolve_compiler_settings(
    options: &OptionSet,
    paths: &DerivedPaths,
    aliases: &AliasTable,
    flags: &FlagTable,
) -> Result<CompilerSettings, ConfigError> {
    let compiler = aliases.normalize(&options.compilers.cc)?;
    let groups = flags.groups_for(compiler.identity, options.build_type)?;

    let mut ccflags: Vec<String> = width_defines(options).into_iter().collect();
    for group in groups {
        ccflags.extend(group.split_whitespace().map(str::to_string));
    }
    ccflags.extend(platform_flags(options));
    ccflags.push(mpi_define(options).to_string());

    let mut f90flags = ccflags.clone();
    f90flags.extend(FORTRAN_EXTRA_FLAGS.iter().map(|f| f.to_string()));

    let include = paths.project_include_dir.clone();
    let mut settings = CompilerSettings {
        compiler,
        ccflags,
        f90flags,
        cpppath: vec![include.clone(), options.mpi.inc_path.clone()],
        f90path: vec![include.clone(), options.mpi.inc_path.clone()],
        fortran_module_dir: include,
        libpath_common: vec![paths.lib_dir.clone()],
        libpath_apps: Vec::new(),
        libpath_libs: Vec::new(),
        libpath: Vec::new(),
        libs: vec![options.mpi.lib_name.clone()],
    };

    match options.platform {
        Platform::Windows => settings.libpath.push(options.mpi.lib_path.clone()),
        Platform::Linux | Platform::Sw => {
            settings.libpath_common.push(options.mpi.lib_path.clone())
        }
    }

    tracing::debug!(
        "{} flags for {}: {}",
        options.build_type,
        settings.compiler.identity,
        settings.ccflags_string()
    );

    Ok(settings)
}
