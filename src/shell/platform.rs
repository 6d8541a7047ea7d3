//! Platform detection for installer setup commands.

use std::fmt;

/// Platforms an installer setup command can be keyed by.
///
/// Windows is detected so it can be reported as unsupported rather than
/// silently falling through to a Linux command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOS,
    Linux,
    Windows,
}

impl Platform {
    /// Detect the current platform.
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Platform::MacOS
        } else if cfg!(target_os = "windows") {
            Platform::Windows
        } else {
            Platform::Linux
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::MacOS => write!(f, "mac"),
            Platform::Linux => write!(f, "linux"),
            Platform::Windows => write!(f, "windows"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn current_returns_a_platform() {
        // Just ensure detection doesn't panic and is stable
        assert_eq!(Platform::current(), Platform::current());
    }

    #[test]
    fn display_matches_config_keys() {
        assert_eq!(Platform::MacOS.to_string(), "mac");
        assert_eq!(Platform::Linux.to_string(), "linux");
        assert_eq!(Platform::Windows.to_string(), "windows");
    }
}
