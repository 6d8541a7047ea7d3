//! Shell command execution and platform detection.

pub mod command;
pub mod platform;

pub use command::{CommandResult, CommandRunner, ShellRunner};
pub use platform::Platform;
