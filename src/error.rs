//! Error types for Muster operations.
//!
//! This module defines [`MusterError`], the primary error type used throughout
//! the application, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Configuration problems abort the run before any command executes
//! - A shell command exiting non-zero is NOT an error: it is a normal,
//!   inspectable [`CommandResult`](crate::shell::CommandResult)
//! - Use `anyhow::Error` (via `MusterError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for Muster operations.
#[derive(Debug, Error)]
pub enum MusterError {
    /// Requirements file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse the requirements file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Structurally valid YAML that violates the configuration rules.
    #[error("Invalid configuration: {message}")]
    ConfigValidation { message: String },

    /// The shell itself could not be spawned for a command.
    #[error("Failed to spawn command: {command}")]
    CommandSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MusterError {
    /// Whether this error means the configuration is unusable.
    ///
    /// Configuration errors map to a distinct process exit code so
    /// scripts can tell "machine does not meet requirements" apart from
    /// "requirements file is broken".
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            MusterError::ConfigNotFound { .. }
                | MusterError::ConfigParse { .. }
                | MusterError::ConfigValidation { .. }
        )
    }
}

/// Result type alias for Muster operations.
pub type Result<T> = std::result::Result<T, MusterError>;
