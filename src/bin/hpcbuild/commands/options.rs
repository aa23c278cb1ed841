//! `hpcbuild options` command

use anyhow::Result;

use hpcbuild::core::platform::{host_os_tag, Platform};
use hpcbuild::core::schema::{schema, OptionKind};

use super::GlobalArgs;
use crate::cli::OptionsArgs;

pub fn execute(args: OptionsArgs, global: &GlobalArgs) -> Result<()> {
    let session = global.session(args.json)?;

    // --platform, then the configured PLATFORM, then the host
    let tag = match args.platform {
        Some(tag) => tag,
        None => session
            .config
            .variables
            .get("PLATFORM")
            .map(|v| v.as_text())
            .unwrap_or_else(host_os_tag),
    };
    let platform = Platform::parse(&tag)?;
    let decls = schema(platform);

    if args.json {
        return session.shell.print_json(&decls);
    }

    let mut out = format!("Build variables for platform `{}`:\n", platform);
    for decl in &decls {
        let kind = match &decl.kind {
            OptionKind::Enum { allowed } => allowed.join("|"),
            OptionKind::Bool => "bool".to_string(),
            OptionKind::Path => "path".to_string(),
            OptionKind::Text => "text".to_string(),
        };
        out.push_str(&format!(
            "\n  {:<14}{}\n      kind: {}, default: {}",
            decl.name, decl.help, kind, decl.default
        ));
    }
    session.shell.print(out)?;
    Ok(())
}
