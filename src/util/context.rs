//! Global context for hpcbuild operations.
//!
//! Holds the project root and the hpcbuild home directory, and knows where
//! each configuration layer lives.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;

use super::config::{load_config, Config};

/// Name of the per-user and per-project hpcbuild directory.
pub const HPCBUILD_DIR: &str = ".hpcbuild";

/// Name of the configuration file inside [`HPCBUILD_DIR`].
pub const CONFIG_FILE: &str = "config.toml";

/// Environment variable overriding the hpcbuild home directory.
pub const HOME_ENV: &str = "HPCBUILD_HOME";

/// Global context containing configuration paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Root of the project being configured
    project_root: PathBuf,

    /// Home directory for global hpcbuild data (~/.hpcbuild/)
    home: Option<PathBuf>,

    /// Explicit configuration file (`--config`)
    explicit_config: Option<PathBuf>,
}

/// Locate the hpcbuild home directory.
///
/// `HPCBUILD_HOME` wins; otherwise `~/.hpcbuild`.
pub fn global_config_dir() -> Option<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Some(PathBuf::from(dir));
    }
    BaseDirs::new().map(|dirs| dirs.home_dir().join(HPCBUILD_DIR))
}

impl GlobalContext {
    /// Create a context rooted at the current directory.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_project_root(cwd))
    }

    /// Create a context for a specific project root.
    pub fn with_project_root(project_root: PathBuf) -> Self {
        GlobalContext {
            project_root,
            home: global_config_dir(),
            explicit_config: None,
        }
    }

    /// Override the home directory.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// Set the explicit configuration file.
    pub fn with_explicit_config(mut self, path: Option<PathBuf>) -> Self {
        self.explicit_config = path;
        self
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> Option<PathBuf> {
        self.home.as_ref().map(|h| h.join(CONFIG_FILE))
    }

    /// Get the project-local hpcbuild directory.
    pub fn project_hpcbuild_dir(&self) -> PathBuf {
        self.project_root.join(HPCBUILD_DIR)
    }

    /// Get the project configuration file path.
    pub fn project_config_path(&self) -> PathBuf {
        self.project_hpcbuild_dir().join(CONFIG_FILE)
    }

    pub fn explicit_config(&self) -> Option<&Path> {
        self.explicit_config.as_deref()
    }

    /// Load and merge every configuration layer.
    pub fn load_config(&self) -> Result<Config> {
        let global = self.config_path();
        load_config(global.as_deref(), &self.project_config_path(), self.explicit_config())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::options::RawValue;
    use tempfile::TempDir;

    #[test]
    fn test_context_paths() {
        let ctx = GlobalContext::with_project_root(PathBuf::from("/work/proj"))
            .with_home(Some(PathBuf::from("/home/user/.hpcbuild")));

        assert_eq!(ctx.project_root(), Path::new("/work/proj"));
        assert_eq!(ctx.config_path(), Some(PathBuf::from("/home/user/.hpcbuild/config.toml")));
        assert_eq!(ctx.project_config_path(), PathBuf::from("/work/proj/.hpcbuild/config.toml"));
        assert!(ctx.explicit_config().is_none());
    }

    #[test]
    fn test_context_without_home() {
        let ctx = GlobalContext::with_project_root(PathBuf::from("/work/proj")).with_home(None);
        assert!(ctx.config_path().is_none());
    }

    #[test]
    fn test_context_loads_layers() {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join("home");
        let root = tmp.path().join("proj");
        std::fs::create_dir_all(&home).unwrap();
        std::fs::create_dir_all(root.join(HPCBUILD_DIR)).unwrap();

        std::fs::write(home.join(CONFIG_FILE), "[variables]\nCC = \"icc\"\nOMP = true\n").unwrap();
        std::fs::write(root.join(HPCBUILD_DIR).join(CONFIG_FILE), "[variables]\nOMP = false\n").unwrap();

        let ctx = GlobalContext::with_project_root(root).with_home(Some(home));
        let config = ctx.load_config().unwrap();

        assert_eq!(config.variables.get("CC"), Some(&RawValue::from("icc")));
        assert_eq!(config.variables.get("OMP"), Some(&RawValue::Bool(false)));
    }
}
