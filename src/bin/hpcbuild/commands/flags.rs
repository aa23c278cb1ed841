//! `hpcbuild flags` command

use anyhow::{bail, Result};
use serde_json::json;

use hpcbuild::builder::profile::CompileProfile;

use super::GlobalArgs;
use crate::cli::FlagsArgs;

pub fn execute(args: FlagsArgs, global: &GlobalArgs) -> Result<()> {
    let session = global.session(args.json)?;
    let cfg = session.configure(&args.vars, false)?;

    let Some(name) = args.profile.as_deref() else {
        let flags = if args.fortran {
            &cfg.compiler.f90flags
        } else {
            &cfg.compiler.ccflags
        };
        if args.json {
            return session.shell.print_json(&json!({
                "compiler": cfg.compiler.compiler,
                "flags": flags,
            }));
        }
        session.shell.print(flags.join(" "))?;
        return Ok(());
    };

    let Some(profile) = CompileProfile::from_name(name) else {
        let names: Vec<_> = CompileProfile::all().iter().map(|p| p.name()).collect();
        bail!(
            "unknown profile `{}`\nhelp: expected one of: {}",
            name,
            names.join(", ")
        );
    };

    let Some(command) = cfg.profiles.iter().find(|p| p.profile == profile) else {
        bail!(
            "profile `{}` is not active for {}\n\
             help: accelerator profiles need PLATFORM=sw ATHREAD=true",
            name,
            cfg.paths.build_option
        );
    };

    if args.json {
        return session.shell.print_json(command);
    }
    session.shell.print(&command.command)?;
    Ok(())
}
