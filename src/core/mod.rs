//! Core types: platforms, build options, the option schema and the paths
//! derived from them.

pub mod errors;
pub mod options;
pub mod paths;
pub mod platform;
pub mod schema;
pub mod thirdparty;

pub use errors::ConfigError;
pub use options::{OptionSet, RawOptions, RawValue};
pub use paths::DerivedPaths;
pub use platform::Platform;
pub use schema::resolve_options;
pub use thirdparty::{ThirdParty, ThirdPartyConfig};
