//! Header installation planning.
//!
//! Public headers are collected from the source tree and installed flat
//! into the project include directory. Only the plan is computed here;
//! copying is left to the build tool.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;
use walkdir::{DirEntry, WalkDir};

use crate::core::platform::Platform;

/// Header file extensions that are installed.
pub const HEADER_EXTENSIONS: [&str; 5] = [".hpp", ".H", ".hxx", ".h", ".hh"];

/// Generated include dirs that must never be scanned.
const SKIP_DIR: &str = "lnInclude";

/// Marker for directories holding per-OS subdirectories.
const OS_SPECIFIC: &str = "OSspecific";

/// One header to install.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HeaderInstall {
    pub source: PathBuf,
    pub dest: PathBuf,
}

/// Whether a file name has one of the header extensions.
pub fn is_header(name: &str) -> bool {
    HEADER_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// Whether a directory entry should be descended into.
fn keep_dir(entry: &DirEntry, os_family: &str) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return true;
    }

    let name = entry.file_name().to_string_lossy();
    if name == SKIP_DIR {
        return false;
    }

    // Inside an OSspecific dir only the matching OS subtree is kept
    let parent_is_os_specific = entry
        .path()
        .parent()
        .and_then(Path::file_name)
        .is_some_and(|p| p.to_string_lossy().contains(OS_SPECIFIC));
    !parent_is_os_specific || name == os_family
}

/// Plan the installation of every header under `source_dir`.
///
/// The result is sorted by source path, so the plan is deterministic.
/// Headers are installed flat, so two headers with the same file name
/// anywhere in the tree are an error.
pub fn plan_headers(
    source_dir: &Path,
    include_dir: &Path,
    platform: Platform,
) -> Result<Vec<HeaderInstall>> {
    let os_family = platform.os_family();
    let mut plan = Vec::new();
    let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

    let walker = WalkDir::new(source_dir)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| keep_dir(e, os_family));

    for entry in walker {
        let entry = entry
            .with_context(|| format!("failed to walk source tree: {}", source_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if !is_header(&name) {
            continue;
        }

        let source = entry.path().to_path_buf();
        let dest = include_dir.join(entry.file_name());
        if let Some(first) = claimed.insert(dest.clone(), source.clone()) {
            bail!(
                "headers `{}` and `{}` would both install to {}",
                first.display(),
                source.display(),
                dest.display()
            );
        }
        plan.push(HeaderInstall { source, dest });
    }

    plan.sort_by(|a, b| a.source.cmp(&b.source));
    tracing::debug!("{} headers planned from {}", plan.len(), source_dir.display());
    Ok(plan)
}
