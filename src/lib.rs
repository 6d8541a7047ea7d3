//! Muster - declarative workstation provisioning checker.
//!
//! Muster reads a YAML requirements file describing installers,
//! packages, and authentication artifacts, checks the current machine
//! against minimum version requirements, and remediates out-of-date
//! packages by invoking the configured installers.
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Configuration loading, validation, and resolution
//! - [`engine`] - Three-phase reconciliation engine and outcome tally
//! - [`error`] - Error types and result aliases
//! - [`report`] - Final pass/fail summary
//! - [`shell`] - Shell command execution and platform detection
//! - [`ui`] - Terminal output
//! - [`version`] - Version parsing and comparison
//!
//! # Example
//!
//! ```
//! use muster::version::{check, Version, VersionCheck};
//!
//! let required: Version = "2.21".parse().unwrap();
//! assert_eq!(check("2.22", &required), VersionCheck::Satisfied);
//! assert_eq!(check("2.20", &required), VersionCheck::Unsatisfied);
//! ```

pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod report;
pub mod shell;
pub mod ui;
pub mod version;

pub use error::{MusterError, Result};
