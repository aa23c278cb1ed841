//! Compiler configuration.
//!
//! This module turns a resolved option set into the flags, paths and
//! command templates the external build tool runs with.

pub mod flags;
pub mod headers;
pub mod messages;
pub mod profile;
pub mod target;
pub mod toolchain;

pub use flags::{resolve_compiler_settings, CompilerSettings};
pub use headers::{plan_headers, HeaderInstall};
pub use messages::ActionMessages;
pub use profile::{CompileProfile, ProfileCommand, SourceLanguage};
pub use target::{TargetSettings, TargetSpec};
pub use toolchain::{AliasTable, CommandSpec, CompilerIdentity, FlagTable};
