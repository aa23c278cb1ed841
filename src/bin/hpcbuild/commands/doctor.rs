//! `hpcbuild doctor` command

use anyhow::Result;

use hpcbuild::ops::doctor;

use super::GlobalArgs;
use crate::cli::DoctorArgs;

pub fn execute(args: DoctorArgs, global: &GlobalArgs) -> Result<()> {
    let session = global.session(args.json)?;
    let cfg = session.configure(&args.vars, false)?;
    let report = doctor(&cfg.options);

    if args.json {
        session.shell.print_json(&report)?;
    } else {
        session.shell.print(&report)?;
    }

    // Exit with error code if any tool is missing
    if !report.all_found() {
        std::process::exit(1);
    }

    Ok(())
}
