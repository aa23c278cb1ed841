//! hpcbuild - build configuration for HPC C/C++/Fortran projects
//!
//! This crate turns `KEY=VALUE` build variables and TOML site configuration
//! into a complete build configuration: validated options, derived install
//! paths, compiler flags, compilation profiles, target settings and header
//! installation plans.

pub mod builder;
pub mod core;
pub mod ops;
pub mod util;

/// Shared fixtures for unit tests.
#[cfg(test)]
pub mod test_support;

pub use core::{resolve_options, ConfigError, DerivedPaths, OptionSet, Platform, RawOptions, RawValue};
pub use ops::{configure, BuildConfiguration, ConfigureOptions};
pub use util::context::GlobalContext;
