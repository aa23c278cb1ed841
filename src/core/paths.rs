//! Directories derived from the project root and the option set.

use std::path::{Path, PathBuf};

use serde::Serialize;

use super::options::{Choice, OptionSet};

/// Install and source directories for one build configuration.
///
/// Every distinct (platform, compiler, int width, float width, build type)
/// combination gets its own install root, so differently configured
/// builds never overwrite each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DerivedPaths {
    /// Path segment identifying the configuration (e.g. `linuxg++Int32Float64Opt`)
    pub build_option: String,
    pub install_root: PathBuf,
    pub bin_dir: PathBuf,
    pub lib_dir: PathBuf,
    pub include_dir: PathBuf,
    /// Global include directory passed to every compile
    pub project_include_dir: PathBuf,
    pub source_dir: PathBuf,
    pub external_dir: PathBuf,
    pub external_windows_dir: PathBuf,
}

impl DerivedPaths {
    /// Compute the derived paths for `options` under `project_root`.
    ///
    /// Pure string construction; no directory is created or checked.
    pub fn new(project_root: &Path, options: &OptionSet) -> Self {
        let build_option = build_option(options);
        let install_root = project_root.join("install").join(&build_option);
        let include_dir = install_root.join("include");
        let external_dir = project_root.join("external");

        DerivedPaths {
            bin_dir: install_root.join("bin"),
            lib_dir: install_root.join("lib"),
            project_include_dir: include_dir.clone(),
            include_dir,
            source_dir: project_root.join("src"),
            external_windows_dir: external_dir.join("windows"),
            external_dir,
            build_option,
            install_root,
        }
    }
}

/// Build the configuration identifier used as an install path segment.
pub fn build_option(options: &OptionSet) -> String {
    format!(
        "{}{}Int{}Float{}{}",
        options.platform.as_str(),
        compiler_segment(&options.compilers.cxx),
        options.int_type.as_str(),
        options.float_type.as_str(),
        options.build_type.as_str(),
    )
}

/// The C++ compiler as a single path segment.
///
/// A bare name is kept as is. A path keeps every component, with separators
/// (and a drive colon) turned into `_`, so two compilers with the same
/// basename in different directories stay apart.
pub fn compiler_segment(cxx: &str) -> String {
    cxx.chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect()
}

/// Basename of an executable given as a bare name or a path.
///
/// Handles both `/` and `\` separators regardless of the host OS.
pub fn executable_basename(exe: &str) -> &str {
    exe.rsplit(['/', '\\']).next().unwrap_or(exe)
}
