//! Toolchain availability checks.
//!
//! The `doctor` command looks up every executable the resolved options
//! name (compilers and linkers) on `PATH`. Nothing is executed; a missing
//! tool is only reported, since configuration may happen on a login node
//! that differs from the build node.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::core::options::OptionSet;

/// Result of looking up one executable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolCheck {
    /// Variable names that select this executable (e.g. `CC`, `CC_HOST`)
    pub roles: Vec<&'static str>,

    /// Executable name or path as configured
    pub program: String,

    /// Resolved location, if found
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl ToolCheck {
    pub fn found(&self) -> bool {
        self.path.is_some()
    }
}

/// Outcome of all checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DoctorReport {
    pub checks: Vec<ToolCheck>,
}

impl DoctorReport {
    pub fn all_found(&self) -> bool {
        self.checks.iter().all(ToolCheck::found)
    }

    pub fn missing(&self) -> impl Iterator<Item = &ToolCheck> {
        self.checks.iter().filter(|c| !c.found())
    }
}

/// Executables named by the option set, in declaration order.
pub fn configured_tools(options: &OptionSet) -> Vec<(&'static str, &str)> {
    let c = &options.compilers;
    let mut tools = vec![
        ("CC", c.cc.as_str()),
        ("CXX", c.cxx.as_str()),
        ("F90", c.f90.as_str()),
        ("CXX_LINKER", c.cxx_linker.as_str()),
        ("F_LINKER", c.f_linker.as_str()),
    ];
    if let Some(acc) = options.accelerator.as_ref().filter(|a| a.athread) {
        tools.push(("CC_HOST", acc.cc_host.as_str()));
        tools.push(("CC_SLAVE", acc.cc_slave.as_str()));
        tools.push(("CXX_HOST", acc.cxx_host.as_str()));
    }
    tools
}

/// Look up every configured executable.
///
/// Executables used in several roles are checked once.
pub fn doctor(options: &OptionSet) -> DoctorReport {
    let mut report = DoctorReport::default();

    for (role, program) in configured_tools(options) {
        if let Some(existing) = report.checks.iter_mut().find(|c| c.program == program) {
            existing.roles.push(role);
            continue;
        }

        let path = which::which(program).ok();
        match &path {
            Some(p) => tracing::debug!("{} found at {}", program, p.display()),
            None => tracing::debug!("{} not found on PATH", program),
        }
        report.checks.push(ToolCheck {
            roles: vec![role],
            program: program.to_string(),
            path,
        });
    }

    report
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Toolchain:")?;
        for check in &self.checks {
            let status = if check.found() { "[OK]" } else { "[!!]" };
            write!(f, "  {} {:<14} {}", status, check.roles.join(", "), check.program)?;
            match &check.path {
                Some(path) => writeln!(f, " ({})", path.display())?,
                None => writeln!(f, " (not found)")?,
            }
        }

        let missing = self.missing().count();
        writeln!(f)?;
        if missing == 0 {
            writeln!(f, "All {} tools found.", self.checks.len())
        } else {
            writeln!(f, "{} of {} tools not found on PATH.", missing, self.checks.len())
        }
    }
}
