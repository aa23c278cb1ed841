//! Produce a complete build configuration.
//!
//! Merges the configuration layers with the command-line variables, then
//! runs every resolution step in order: options, derived paths, compiler
//! settings, third-party wiring, profiles, targets and (optionally) the
//! header plan.

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::builder::flags::{resolve_compiler_settings, CompilerSettings};
use crate::builder::headers::{plan_headers, HeaderInstall};
use crate::builder::messages::ActionMessages;
use crate::builder::profile::{resolve_profiles, ProfileCommand};
use crate::builder::target::TargetSettings;
use crate::core::options::{OptionSet, RawOptions};
use crate::core::paths::DerivedPaths;
use crate::core::schema::resolve_options;
use crate::core::thirdparty::ThirdParty;
use crate::util::config::Config;

/// Options for a configure run.
#[derive(Debug, Clone, Default)]
pub struct ConfigureOptions {
    /// Project root; all derived paths hang off it
    pub project_root: PathBuf,

    /// `KEY=VALUE` variables from the command line
    pub variables: RawOptions,

    /// Colorize the action messages
    pub color: bool,

    /// Also compute the header installation plan
    pub plan_headers: bool,
}

/// The complete, immutable configuration handed to the build tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildConfiguration {
    pub options: OptionSet,
    pub paths: DerivedPaths,
    pub compiler: CompilerSettings,
    pub thirdparty: ThirdParty,
    pub profiles: Vec<ProfileCommand>,
    pub targets: Vec<TargetSettings>,
    /// Short action messages; absent when `VERBOSE` is on
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messages: Option<ActionMessages>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<Vec<HeaderInstall>>,
}

/// Merge the file-level variables with the command-line ones.
///
/// Command-line values win.
pub fn merged_variables(config: &Config, cli: &RawOptions) -> RawOptions {
    let mut raw = config.variables.clone();
    raw.merge(cli);
    raw
}

/// Resolve a full build configuration.
///
/// Option and flag errors are returned as [`ConfigError`](crate::core::ConfigError)
/// inside the `anyhow` error, so callers can downcast them for diagnostics.
pub fn configure(config: &Config, opts: &ConfigureOptions) -> Result<BuildConfiguration> {
    let raw = merged_variables(config, &opts.variables);
    let options = resolve_options(&raw)?;

    let paths = DerivedPaths::new(&opts.project_root, &options);
    let aliases = config.alias_table()?;
    let flag_table = config.flag_table()?;
    let compiler = resolve_compiler_settings(&options, &paths, &aliases, &flag_table)?;

    let thirdparty = ThirdParty::resolve(&config.thirdparty, &options, &paths.build_option);
    let profiles = resolve_profiles(&options, &compiler);
    let targets = config
        .targets
        .iter()
        .map(|t| t.resolve(&options, &paths, &compiler, &thirdparty))
        .collect::<Vec<_>>();
    tracing::debug!("{} targets, {} profiles", targets.len(), profiles.len());

    let messages = (!options.verbose).then(|| ActionMessages::new(opts.color));

    let headers = if opts.plan_headers {
        let plan = plan_headers(&paths.source_dir, &paths.project_include_dir, options.platform)
            .context("failed to plan header installation")?;
        Some(plan)
    } else {
        None
    };

    Ok(BuildConfiguration {
        options,
        paths,
        compiler,
        thirdparty,
        profiles,
        targets,
        messages,
        headers,
    })
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, label: &str, items: &[T]) -> fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    writeln!(f, "  {}:", label)?;
    for item in items {
        writeln!(f, "    {}", item)?;
    }
    Ok(())
}

impl fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = &self.options;
        writeln!(f, "Build option: {}", self.paths.build_option)?;
        writeln!(f, "  platform:   {}", o.platform)?;
        writeln!(f, "  build type: {}", o.build_type)?;
        writeln!(f, "  precision:  {}", o.precision)?;
        writeln!(f, "  lib type:   {}", o.lib_type)?;
        writeln!(f)?;

        let c = &self.compiler;
        writeln!(
            f,
            "Compiler: {} ({})",
            c.compiler.basename, c.compiler.identity
        )?;
        writeln!(f, "  CCFLAGS:  {}", c.ccflags_string())?;
        writeln!(f, "  F90FLAGS: {}", c.f90flags_string())?;
        let cpppath: Vec<_> = c.cpppath.iter().map(|p| p.display()).collect();
        write_list(f, "CPPPATH", &cpppath)?;
        let libpath: Vec<_> = c
            .libpath
            .iter()
            .chain(&c.libpath_common)
            .map(|p| p.display())
            .collect();
        write_list(f, "LIBPATH", &libpath)?;
        write_list(f, "LIBS", &c.libs)?;
        writeln!(f)?;

        writeln!(f, "Profiles:")?;
        for p in &self.profiles {
            writeln!(f, "  {:<8} {}", p.profile.name(), p.command)?;
        }

        if !self.targets.is_empty() {
            writeln!(f)?;
            writeln!(f, "Targets:")?;
            for t in &self.targets {
                match &t.install_dir {
                    Some(dir) => writeln!(f, "  {} ({:?}) -> {}", t.name, t.artifact, dir.display())?,
                    None => writeln!(f, "  {} ({:?})", t.name, t.artifact)?,
                }
            }
        }

        if let Some(headers) = &self.headers {
            writeln!(f)?;
            writeln!(f, "Headers: {} to install", headers.len())?;
        }

        if !o.unknown.is_empty() {
            writeln!(f)?;
            writeln!(f, "Unknown variables: {}", o.unknown.join(", "))?;
        }
        Ok(())
    }
}
