//! Target platforms.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::errors::ConfigError;

/// A build platform the project knows how to configure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Windows with a MinGW-style GNU toolchain and MPICH2
    Windows,
    /// Linux cluster
    Linux,
    /// Sunway many-core accelerator platform (host + slave cores)
    Sw,
}

impl Platform {
    /// All supported platforms, in declaration order.
    pub const ALL: [Platform; 3] = [Platform::Windows, Platform::Linux, Platform::Sw];

    /// Get the platform tag as used in build variables.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::Sw => "sw",
        }
    }

    /// The platform tags accepted by `PLATFORM`.
    pub fn allowed_values() -> Vec<String> {
        Self::ALL.iter().map(|p| p.as_str().to_string()).collect()
    }

    /// Whether this platform uses the host/slave offload model.
    pub fn is_accelerator(&self) -> bool {
        matches!(self, Platform::Sw)
    }

    /// Operating system family used for `OSspecific` source directories.
    pub fn os_family(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Linux | Platform::Sw => "posix",
        }
    }

    /// Parse a platform tag.
    pub fn parse(tag: &str) -> Result<Self, ConfigError> {
        tag.parse()
    }
}

impl std::str::FromStr for Platform {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "windows" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            "sw" => Ok(Platform::Sw),
            _ => Err(ConfigError::UnsupportedPlatform {
                platform: s.to_string(),
                supported: Platform::allowed_values(),
            }),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operating system tag of the machine running the configuration.
///
/// `windows` on Windows, otherwise the lower-case OS name (`linux`,
/// `macos`, ...). Non-supported hosts must pass `PLATFORM` explicitly.
pub fn host_os_tag() -> String {
    if cfg!(windows) {
        "windows".to_string()
    } else {
        std::env::consts::OS.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_parse() {
        assert_eq!("linux".parse::<Platform>().unwrap(), Platform::Linux);
        assert_eq!("sw".parse::<Platform>().unwrap(), Platform::Sw);
        assert_eq!("windows".parse::<Platform>().unwrap(), Platform::Windows);
    }

    #[test]
    fn test_platform_parse_is_case_sensitive() {
        assert!("Linux".parse::<Platform>().is_err());
    }

    #[test]
    fn test_unsupported_platform_lists_supported() {
        let err = "darwin".parse::<Platform>().unwrap_err();
        match err {
            ConfigError::UnsupportedPlatform { platform, supported } => {
                assert_eq!(platform, "darwin");
                assert_eq!(supported, vec!["windows", "linux", "sw"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_os_family() {
        assert_eq!(Platform::Windows.os_family(), "windows");
        assert_eq!(Platform::Linux.os_family(), "posix");
        assert_eq!(Platform::Sw.os_family(), "posix");
    }

    #[test]
    fn test_only_sw_is_accelerator() {
        assert!(Platform::Sw.is_accelerator());
        assert!(!Platform::Linux.is_accelerator());
        assert!(!Platform::Windows.is_accelerator());
    }
}
