//! Command implementations

pub mod completions;
pub mod configure;
pub mod doctor;
pub mod flags;
pub mod headers;
pub mod options;
pub mod paths;

use std::path::PathBuf;

use anyhow::{anyhow, Result};

use hpcbuild::core::RawOptions;
use hpcbuild::ops::{self, BuildConfiguration, ConfigureOptions};
use hpcbuild::util::shell::{ColorChoice, Shell};
use hpcbuild::util::{Config, GlobalContext};

use crate::cli::VarArgs;

/// Flags shared by every command.
pub struct GlobalArgs {
    pub color: ColorChoice,
    pub project_dir: Option<PathBuf>,
    pub config: Option<PathBuf>,
}

/// Everything a resolving command needs.
pub struct Session {
    pub shell: Shell,
    pub ctx: GlobalContext,
    pub config: Config,
}

impl GlobalArgs {
    /// Build the context, load the configuration layers and set up the shell.
    pub fn session(&self, json: bool) -> Result<Session> {
        let ctx = match &self.project_dir {
            Some(dir) => GlobalContext::with_project_root(dir.clone()),
            None => GlobalContext::new()?,
        }
        .with_explicit_config(self.config.clone());

        let config = ctx.load_config()?;
        let shell = Shell::from_flags(self.color, json);

        Ok(Session { shell, ctx, config })
    }
}

/// Parse `KEY=VALUE` arguments.
pub fn parse_vars(args: &VarArgs) -> Result<RawOptions> {
    RawOptions::from_assignments(&args.vars).map_err(|e| anyhow!(e))
}

impl Session {
    /// Resolve the full configuration for the given command-line variables.
    pub fn configure(&self, vars: &VarArgs, plan_headers: bool) -> Result<BuildConfiguration> {
        let opts = ConfigureOptions {
            project_root: self.ctx.project_root().to_path_buf(),
            variables: parse_vars(vars)?,
            color: self.shell.use_color(),
            plan_headers,
        };
        ops::configure(&self.config, &opts)
    }
}
