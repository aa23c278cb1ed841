//! hpcbuild CLI - build configuration for HPC projects

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use hpcbuild::core::ConfigError;
use hpcbuild::util::config::ConfigFileError;
use hpcbuild::util::diagnostic;
use hpcbuild::util::shell::{ColorChoice, Shell};

fn main() {
    let cli = Cli::parse();
    let color = cli.color;

    if let Err(e) = run(cli) {
        report(&e, color);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    // Logs go to stderr; stdout is reserved for command output
    let filter = if cli.verbose {
        EnvFilter::new("hpcbuild=debug")
    } else {
        EnvFilter::new("hpcbuild=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let global = commands::GlobalArgs {
        color: cli.color,
        project_dir: cli.project_dir,
        config: cli.config,
    };

    match cli.command {
        Commands::Configure(args) => commands::configure::execute(args, &global),
        Commands::Flags(args) => commands::flags::execute(args, &global),
        Commands::Paths(args) => commands::paths::execute(args, &global),
        Commands::Options(args) => commands::options::execute(args, &global),
        Commands::Headers(args) => commands::headers::execute(args, &global),
        Commands::Doctor(args) => commands::doctor::execute(args, &global),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}

/// Print a fatal error, as a full diagnostic when it is a configuration error.
fn report(err: &anyhow::Error, color: ColorChoice) {
    let use_color = Shell::from_flags(color, false).use_color();
    if let Some(config_err) = err.downcast_ref::<ConfigError>() {
        diagnostic::emit(&config_err.to_diagnostic(), use_color);
    } else if let Some(file_err) = err.downcast_ref::<ConfigFileError>() {
        diagnostic::emit(&file_err.to_diagnostic(), use_color);
    } else {
        eprintln!("error: {:#}", err);
    }
}
