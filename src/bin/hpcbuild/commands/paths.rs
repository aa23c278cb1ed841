//! `hpcbuild paths` command

use anyhow::Result;

use super::GlobalArgs;
use crate::cli::PathsArgs;

pub fn execute(args: PathsArgs, global: &GlobalArgs) -> Result<()> {
    let session = global.session(args.json)?;
    let cfg = session.configure(&args.vars, false)?;
    let paths = &cfg.paths;

    if args.json {
        return session.shell.print_json(paths);
    }

    let rows = [
        ("install", &paths.install_root),
        ("bin", &paths.bin_dir),
        ("lib", &paths.lib_dir),
        ("include", &paths.include_dir),
        ("project include", &paths.project_include_dir),
        ("source", &paths.source_dir),
        ("external", &paths.external_dir),
        ("external (windows)", &paths.external_windows_dir),
    ];

    let mut out = format!("{:<20}{}", "build option", paths.build_option);
    for (label, path) in rows {
        out.push_str(&format!("\n{:<20}{}", label, path.display()));
    }
    session.shell.print(out)?;
    Ok(())
}
