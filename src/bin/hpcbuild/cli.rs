//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use hpcbuild::util::shell::ColorChoice;

/// hpcbuild - build configuration for HPC C/C++/Fortran projects
#[derive(Parser)]
#[command(name = "hpcbuild")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Coloring: auto, always, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorChoice,

    /// Project root (defaults to the current directory)
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub project_dir: Option<PathBuf>,

    /// Extra configuration file, applied after the global and project ones
    #[arg(long, global = true, value_name = "FILE", env = "HPCBUILD_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve and print the full build configuration
    Configure(ConfigureArgs),

    /// Print the assembled compile flags
    Flags(FlagsArgs),

    /// Print the derived install and source paths
    Paths(PathsArgs),

    /// List the build variables for a platform
    Options(OptionsArgs),

    /// Show which headers would be installed
    Headers(HeadersArgs),

    /// Check that the configured compilers and linkers are on PATH
    Doctor(DoctorArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Build variables shared by the resolving commands.
#[derive(Args)]
pub struct VarArgs {
    /// Build variables, e.g. `PLATFORM=linux BUILD_TYPE=Debug`
    #[arg(value_name = "KEY=VALUE")]
    pub vars: Vec<String>,
}

#[derive(Args)]
pub struct ConfigureArgs {
    #[command(flatten)]
    pub vars: VarArgs,

    /// Also plan header installation
    #[arg(long)]
    pub headers: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct FlagsArgs {
    #[command(flatten)]
    pub vars: VarArgs,

    /// Print the full command of one profile (c, cxx, fortran, host, slave, cxx-host)
    #[arg(long, value_name = "PROFILE")]
    pub profile: Option<String>,

    /// Print the Fortran flags instead of the C/C++ flags
    #[arg(long, conflicts_with = "profile")]
    pub fortran: bool,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct PathsArgs {
    #[command(flatten)]
    pub vars: VarArgs,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct OptionsArgs {
    /// Platform to list (defaults to the configured or host platform)
    #[arg(long, value_name = "PLATFORM")]
    pub platform: Option<String>,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct HeadersArgs {
    #[command(flatten)]
    pub vars: VarArgs,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DoctorArgs {
    #[command(flatten)]
    pub vars: VarArgs,

    /// Print JSON instead of text
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: CompletionShell,
}
