//! High-level operations.
//!
//! This module contains the implementation of hpcbuild commands.

pub mod configure;
pub mod doctor;

pub use configure::{configure, merged_variables, BuildConfiguration, ConfigureOptions};
pub use doctor::{doctor, DoctorReport, ToolCheck};
