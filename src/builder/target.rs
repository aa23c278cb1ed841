//! Per-target build settings.
//!
//! A target is either a library or an application built from a list of
//! sources. Its settings extend the global compiler settings with
//! target-local include directories, libraries and an install location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::options::{LibType, OptionSet};
use crate::core::paths::DerivedPaths;
use crate::core::thirdparty::ThirdParty;

use super::flags::CompilerSettings;

/// Kind of target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetKind {
    /// Library, built according to `LIB_TYPE`
    Lib,
    /// Executable application
    App,
}

/// Linker driver selection for applications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkerChoice {
    /// `CXX_LINKER`
    Cxx,
    /// `F_LINKER`
    Fortran,
}

/// A target declaration from the site configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub name: String,
    pub kind: TargetKind,
    /// Source files, relative to the project root
    #[serde(default)]
    pub sources: Vec<PathBuf>,
    /// Include directories, relative to the source dir
    #[serde(default)]
    pub include: Vec<PathBuf>,
    /// Libraries to link (without `-l`)
    #[serde(default)]
    pub libs: Vec<String>,
    /// Linker override (applications only)
    #[serde(default)]
    pub linker: Option<LinkerChoice>,
}

/// What the build tool should produce for a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArtifactKind {
    SharedLibrary,
    StaticLibrary,
    /// Object files only; nothing is archived or installed
    Objects,
    Program,
}

/// Resolved settings for one target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetSettings {
    pub name: String,
    pub artifact: ArtifactKind,
    pub sources: Vec<PathBuf>,
    /// Target include dirs (prepended) followed by the global ones
    pub include_dirs: Vec<PathBuf>,
    pub libs: Vec<String>,
    pub lib_dirs: Vec<PathBuf>,
    /// Linker executable, when overridden
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linker: Option<String>,
    /// Install directory, if the artifact is installed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_dir: Option<PathBuf>,
}

impl TargetSpec {
    /// Resolve this target against the global settings.
    pub fn resolve(
        &self,
        options: &OptionSet,
        paths: &DerivedPaths,
        settings: &CompilerSettings,
        thirdparty: &ThirdParty,
    ) -> TargetSettings {
        let mut include_dirs: Vec<PathBuf> =
            self.include.iter().map(|d| paths.source_dir.join(d)).collect();
        include_dirs.extend(thirdparty.include_dirs.iter().cloned());
        include_dirs.extend(settings.cpppath.iter().cloned());

        let mut libs = self.libs.clone();
        libs.extend(thirdparty.libs.iter().cloned());
        libs.extend(settings.libs.iter().cloned());

        let mut lib_dirs = settings.libpath.clone();
        lib_dirs.extend(settings.libpath_common.iter().cloned());
        lib_dirs.extend(thirdparty.lib_dirs.iter().cloned());

        let (artifact, install_dir, linker) = match self.kind {
            TargetKind::Lib => {
                lib_dirs.extend(settings.libpath_libs.iter().cloned());
                let artifact = match options.lib_type {
                    LibType::Shared => ArtifactKind::SharedLibrary,
                    LibType::Static => ArtifactKind::StaticLibrary,
                    LibType::Object => ArtifactKind::Objects,
                };
                let install = (artifact != ArtifactKind::Objects).then(|| paths.lib_dir.clone());
                if self.linker.is_some() {
                    tracing::warn!("linker override on library `{}` is ignored", self.name);
                }
                (artifact, install, None)
            }
            TargetKind::App => {
                lib_dirs.extend(settings.libpath_apps.iter().cloned());
                let linker = self.linker.map(|l| match l {
                    LinkerChoice::Cxx => options.compilers.cxx_linker.clone(),
                    LinkerChoice::Fortran => options.compilers.f_linker.clone(),
                });
                (ArtifactKind::Program, Some(paths.bin_dir.clone()), linker)
            }
        };

        TargetSettings {
            name: self.name.clone(),
            artifact,
            sources: self.sources.clone(),
            include_dirs,
            libs,
            lib_dirs,
            linker,
            install_dir,
        }
    }
}
