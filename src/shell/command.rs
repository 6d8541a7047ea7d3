//! Shell command execution.
//!
//! Requirement checks and remediation commands are opaque,
//! operator-authored shell strings, frequently multi-token pipelines
//! (`git --version | cut -d' ' -f3`). They are executed through a POSIX
//! shell as-is; the configuration is trusted and no sanitization is
//! attempted. A non-zero exit status is a normal, inspectable result,
//! never an error; the only error path is failing to spawn the shell.

use crate::error::{MusterError, Result};
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

/// Result of executing a shell command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal).
    pub exit_code: Option<i32>,

    /// Captured standard output.
    pub stdout: String,

    /// Captured standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether the command succeeded (exit code 0).
    pub success: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
        }
    }

    /// Standard output with trailing whitespace stripped.
    ///
    /// Version extraction commands end with a newline; comparisons want
    /// the bare version string.
    pub fn trimmed_stdout(&self) -> &str {
        self.stdout.trim_end()
    }
}

/// Executes a shell command string, returning captured output and status.
///
/// The engine depends on this seam rather than on [`ShellRunner`]
/// directly so tests can script command responses.
pub trait CommandRunner {
    /// Run `command` to completion, capturing stdout and stderr.
    fn run(&self, command: &str) -> Result<CommandResult>;
}

/// Production runner: executes through the user's POSIX shell.
#[derive(Debug, Default)]
pub struct ShellRunner;

impl ShellRunner {
    /// Create a new shell runner.
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<CommandResult> {
        let start = Instant::now();

        let output = Command::new(detect_shell())
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| MusterError::CommandSpawn {
                command: command.to_string(),
                source,
            })?;

        let duration = start.elapsed();
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();

        if output.status.success() {
            Ok(CommandResult::success(stdout, stderr, duration))
        } else {
            Ok(CommandResult::failure(
                output.status.code(),
                stdout,
                stderr,
                duration,
            ))
        }
    }
}

/// Detect the shell to execute through.
fn detect_shell() -> String {
    std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
}
