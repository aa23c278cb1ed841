//! Short per-action build messages.
//!
//! When `VERBOSE` is off the build tool prints these one-liners instead of
//! full command lines. Each template keeps the build tool's `$SOURCE` /
//! `$TARGET` placeholder.

use std::collections::BTreeMap;

use serde::Serialize;

const BLUE: &str = "\x1b[94m";
const PURPLE: &str = "\x1b[95m";
const YELLOW: &str = "\x1b[93m";
const GREEN: &str = "\x1b[92m";
const RED: &str = "\x1b[91m";
const END: &str = "\x1b[0m";

/// Color of the action word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Compile,
    Link,
    Archive,
}

impl Tone {
    fn code(&self) -> &'static str {
        match self {
            Tone::Compile => BLUE,
            Tone::Link => GREEN,
            Tone::Archive => RED,
        }
    }
}

/// Message templates keyed by build-tool variable name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ActionMessages {
    messages: BTreeMap<&'static str, String>,
}

impl ActionMessages {
    /// Build the message set, with or without ANSI colors.
    pub fn new(color: bool) -> Self {
        let fmt = |tone: Tone, action: &str, subject: &str| {
            if color {
                format!("{}{} {}==> {}{}{}", tone.code(), action, PURPLE, YELLOW, subject, END)
            } else {
                format!("{} ==> {}", action, subject)
            }
        };

        let compile = fmt(Tone::Compile, "Compiling", "$SOURCE");
        let compile_shared = fmt(Tone::Compile, "Compiling shared", "$SOURCE");
        let link_program = fmt(Tone::Link, "Linking Program", "$TARGET");
        let link_static = fmt(Tone::Link, "Linking Static Library", "$TARGET");
        let ranlib = fmt(Tone::Link, "Ranlib Library", "$TARGET");
        let link_shared = fmt(Tone::Link, "Linking Shared Library", "$TARGET");
        let jar = fmt(Tone::Archive, "Creating Java Archive", "$TARGET");
        let install = fmt(Tone::Compile, "Install file", "$SOURCE");

        let messages = BTreeMap::from([
            ("CXXCOMSTR", compile.clone()),
            ("CCCOMSTR", compile.clone()),
            ("F90COMSTR", compile.clone()),
            ("JAVACCOMSTR", compile),
            ("SHCCCOMSTR", compile_shared.clone()),
            ("SHCXXCOMSTR", compile_shared.clone()),
            ("SHF90COMSTR", compile_shared),
            ("ARCOMSTR", link_static),
            ("RANLIBCOMSTR", ranlib),
            ("SHLINKCOMSTR", link_shared),
            ("LINKCOMSTR", link_program),
            ("JARCOMSTR", jar),
            ("INSTALLSTR", install),
        ]);

        ActionMessages { messages }
    }

    /// Look up the template for a build-tool variable.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Iterate over `(variable, template)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.messages.iter().map(|(k, v)| (*k, v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
