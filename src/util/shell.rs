//! Shell output for the CLI.
//!
//! Status lines go to stderr so that stdout only carries the requested
//! configuration (text or JSON).

use std::fmt::Display;
use std::io::{self, IsTerminal, Write};

use serde::Serialize;

/// Shell output mode; Human and Json are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellMode {
    /// Human-readable output with optional colors.
    Human { color: ColorChoice },
    /// Machine-readable JSON on stdout, no status lines.
    Json,
}

impl Default for ShellMode {
    fn default() -> Self {
        ShellMode::Human {
            color: ColorChoice::Auto,
        }
    }
}

/// Color output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorChoice {
    /// Detect TTY and use colors if available.
    #[default]
    Auto,
    /// Always use ANSI colors.
    Always,
    /// Never use ANSI colors.
    Never,
}

impl std::str::FromStr for ColorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorChoice::Auto),
            "always" => Ok(ColorChoice::Always),
            "never" => Ok(ColorChoice::Never),
            _ => Err(format!(
                "invalid color choice '{}'; expected 'auto', 'always', or 'never'",
                s
            )),
        }
    }
}

/// Status types for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Configured,
    Found,
    Warning,
}

impl Status {
    fn as_str(&self) -> &'static str {
        match self {
            Status::Configured => "Configured",
            Status::Found => "Found",
            Status::Warning => "Warning",
        }
    }

    fn color_code(&self) -> &'static str {
        match self {
            Status::Configured | Status::Found => "\x1b[1;32m",
            Status::Warning => "\x1b[1;33m",
        }
    }
}

const STATUS_WIDTH: usize = 12;

/// Central shell for all CLI output.
#[derive(Debug)]
pub struct Shell {
    mode: ShellMode,
    use_color: bool,
}

impl Shell {
    /// Create a new shell with the given mode.
    pub fn new(mode: ShellMode) -> Self {
        let use_color = match &mode {
            ShellMode::Json => false,
            ShellMode::Human { color } => match color {
                ColorChoice::Auto => io::stderr().is_terminal(),
                ColorChoice::Always => true,
                ColorChoice::Never => false,
            },
        };

        Shell { mode, use_color }
    }

    /// Create a shell from CLI flags. JSON mode never uses color.
    pub fn from_flags(color: ColorChoice, json: bool) -> Self {
        if json {
            Shell::new(ShellMode::Json)
        } else {
            Shell::new(ShellMode::Human { color })
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.mode, ShellMode::Json)
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    /// Print a status line to stderr: `{status:>12} {message}`.
    ///
    /// Suppressed in JSON mode.
    pub fn status(&self, status: Status, msg: impl Display) {
        if self.is_json() {
            return;
        }
        eprintln!("{} {}", self.format_status(status), msg);
    }

    pub fn warn(&self, msg: impl Display) {
        self.status(Status::Warning, msg);
    }

    /// Print command output to stdout.
    pub fn print(&self, text: impl Display) -> io::Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", text)?;
        out.flush()
    }

    /// Print a value as pretty JSON to stdout.
    pub fn print_json<T: Serialize>(&self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.print(json)?;
        Ok(())
    }

    fn format_status(&self, status: Status) -> String {
        let text = status.as_str();
        if self.use_color {
            format!("{}{:>width$}\x1b[0m", status.color_code(), text, width = STATUS_WIDTH)
        } else {
            format!("{:>width$}", text, width = STATUS_WIDTH)
        }
    }
}

impl Default for Shell {
    fn default() -> Self {
        Shell::new(ShellMode::default())
    }
}
