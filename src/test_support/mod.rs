//! Shared fixtures for unit tests.
//!
//! Option sets are produced through the real resolver so that tests see
//! the same defaults a user would.

use std::path::PathBuf;

use crate::core::options::{OptionSet, RawOptions};
use crate::core::schema::resolve_options;

/// Raw options selecting the cluster platform and nothing else.
pub fn linux_raw() -> RawOptions {
    RawOptions::new().with("PLATFORM", "linux")
}

/// Default cluster option set.
pub fn linux_options() -> OptionSet {
    resolve_options(&linux_raw()).expect("linux defaults resolve")
}

/// Default accelerator option set, with or without offload threading.
pub fn sw_options(athread: bool) -> OptionSet {
    let raw = RawOptions::new()
        .with("PLATFORM", "sw")
        .with("ATHREAD", athread);
    resolve_options(&raw).expect("sw defaults resolve")
}

/// Default desktop option set.
pub fn windows_options() -> OptionSet {
    resolve_options(&RawOptions::new().with("PLATFORM", "windows")).expect("windows defaults resolve")
}

/// A project root that never exists on disk.
pub fn project_root() -> PathBuf {
    PathBuf::from("/work/proj")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::platform::Platform;

    #[test]
    fn test_fixtures_resolve() {
        assert_eq!(linux_options().platform, Platform::Linux);
        assert!(sw_options(true).offload_enabled());
        assert!(!sw_options(false).offload_enabled());
        assert_eq!(windows_options().compilers.cxx_linker, "g++");
    }
}
