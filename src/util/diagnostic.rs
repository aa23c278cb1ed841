//! User-friendly diagnostic messages.
//!
//! Configuration errors are rendered with the offending value, the accepted
//! values and a suggested fix.

use std::fmt::{self, Write};
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when an option value is rejected.
    pub const LIST_OPTIONS: &str = "help: Run `hpcbuild options` to see every variable and its accepted values";

    /// Suggestion when the C compiler is not recognized.
    pub const COMPILER_ALIAS: &str =
        "help: Add an entry to `[compiler] aliases` or set `compiler.fallback` in .hpcbuild/config.toml";

    /// Suggestion when a configuration file fails to load.
    pub const CHECK_CONFIG: &str = "help: Run with `--verbose` to see which configuration files were read";
}

/// A fatal diagnostic with context lines and suggested fixes.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub message: String,
    /// File the problem was found in
    pub location: Option<PathBuf>,
    /// `= ...` lines under the message
    pub context: Vec<String>,
    pub suggestions: Vec<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            location: None,
            context: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Render for the terminal, with ANSI colors when `color` is set.
    pub fn format(&self, color: bool) -> String {
        let paint = |code: &str, text: &str| {
            if color {
                format!("\x1b[{}m{}\x1b[0m", code, text)
            } else {
                text.to_string()
            }
        };

        let mut out = String::new();
        let _ = writeln!(out, "{}: {}", paint("1;31", "error"), self.message);
        if let Some(path) = &self.location {
            let _ = writeln!(out, "  --> {}", path.display());
        }
        for line in &self.context {
            let _ = writeln!(out, "  = {}", line);
        }

        if !self.suggestions.is_empty() {
            let _ = writeln!(out, "\n{}: consider:", paint("1;32", "help"));
            for (n, suggestion) in self.suggestions.iter().enumerate() {
                let _ = writeln!(out, "  {}. {}", n + 1, suggestion);
            }
        }
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}
