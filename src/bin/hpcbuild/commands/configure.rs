//! `hpcbuild configure` command

use anyhow::Result;

use hpcbuild::ops::doctor;
use hpcbuild::util::shell::Status;

use super::GlobalArgs;
use crate::cli::ConfigureArgs;

pub fn execute(args: ConfigureArgs, global: &GlobalArgs) -> Result<()> {
    let session = global.session(args.json)?;
    let cfg = session.configure(&args.vars, args.headers)?;

    if args.json {
        return session.shell.print_json(&cfg);
    }

    for missing in doctor(&cfg.options).missing() {
        session.shell.warn(format!(
            "{} `{}` not found on PATH",
            missing.roles.join("/"),
            missing.program
        ));
    }

    session.shell.print(&cfg)?;
    session.shell.status(
        Status::Configured,
        format!("{} in {}", cfg.paths.build_option, session.ctx.project_root().display()),
    );
    Ok(())
}
