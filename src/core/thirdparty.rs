//! Third-party include and library path wiring.
//!
//! Locations of the prebuilt support libraries come from the site
//! configuration (`[thirdparty]`). Libraries built by the same build
//! system are installed per build configuration, so their roots are
//! suffixed with `install/<build_option>`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::options::{Choice, OptionSet};

/// Third-party locations from the site configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ThirdPartyConfig {
    /// Source root of the utilities library (all platforms)
    pub utilities: Option<PathBuf>,
    /// Source root of the unat library (accelerator offload only)
    pub unat: Option<PathBuf>,
    /// Source root of the swArrays library (accelerator offload only)
    pub swarrays: Option<PathBuf>,
    /// Prefix holding per-width ParMETIS builds (accelerator offload only)
    pub metis: Option<PathBuf>,
    /// Install prefix of swlu (accelerator offload only)
    pub swlu: Option<PathBuf>,
    /// Extra include directories, appended as given
    pub include_dirs: Vec<PathBuf>,
    /// Extra library directories, appended as given
    pub lib_dirs: Vec<PathBuf>,
    /// Extra libraries to link (without `-l`)
    pub libs: Vec<String>,
}

impl ThirdPartyConfig {
    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: ThirdPartyConfig) {
        if other.utilities.is_some() {
            self.utilities = other.utilities;
        }
        if other.unat.is_some() {
            self.unat = other.unat;
        }
        if other.swarrays.is_some() {
            self.swarrays = other.swarrays;
        }
        if other.metis.is_some() {
            self.metis = other.metis;
        }
        if other.swlu.is_some() {
            self.swlu = other.swlu;
        }
        self.include_dirs.extend(other.include_dirs);
        self.lib_dirs.extend(other.lib_dirs);
        self.libs.extend(other.libs);
    }
}

/// Resolved third-party paths for one build configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThirdParty {
    pub include_dirs: Vec<PathBuf>,
    pub lib_dirs: Vec<PathBuf>,
    pub libs: Vec<String>,
}

impl ThirdParty {
    /// Expand the configured roots for `options`.
    pub fn resolve(config: &ThirdPartyConfig, options: &OptionSet, build_option: &str) -> Self {
        let mut tp = ThirdParty::default();

        if let Some(root) = &config.utilities {
            tp.add_prefix(&installed(root, build_option));
        }

        if options.offload_enabled() {
            if let Some(root) = &config.unat {
                tp.add_prefix(&installed(root, build_option));
            }
            if let Some(root) = &config.swarrays {
                tp.add_prefix(&installed(root, build_option));
            }
            if let Some(root) = &config.metis {
                let flavour = format!(
                    "gcc710Int{}Float{}",
                    options.int_type.as_str(),
                    options.float_type.as_str()
                );
                tp.add_prefix(&root.join(flavour));
            }
            if let Some(root) = &config.swlu {
                tp.add_prefix(root);
            }
        }

        tp.include_dirs.extend(config.include_dirs.iter().cloned());
        tp.lib_dirs.extend(config.lib_dirs.iter().cloned());
        tp.libs.extend(config.libs.iter().cloned());
        tp
    }

    /// Add `<prefix>/include` and `<prefix>/lib`.
    fn add_prefix(&mut self, prefix: &Path) {
        self.include_dirs.push(prefix.join("include"));
        self.lib_dirs.push(prefix.join("lib"));
    }
}

fn installed(root: &Path, build_option: &str) -> PathBuf {
    root.join("install").join(build_option)
}
