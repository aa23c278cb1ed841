//! `hpcbuild headers` command

use anyhow::Result;

use hpcbuild::util::shell::Status;

use super::GlobalArgs;
use crate::cli::HeadersArgs;

pub fn execute(args: HeadersArgs, global: &GlobalArgs) -> Result<()> {
    let session = global.session(args.json)?;
    let cfg = session.configure(&args.vars, true)?;
    let plan = cfg.headers.unwrap_or_default();

    if args.json {
        return session.shell.print_json(&plan);
    }

    for header in &plan {
        session
            .shell
            .print(format!("{} -> {}", header.source.display(), header.dest.display()))?;
    }
    session.shell.status(
        Status::Found,
        format!("{} headers under {}", plan.len(), cfg.paths.source_dir.display()),
    );
    Ok(())
}
