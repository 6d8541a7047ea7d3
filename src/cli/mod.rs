//! CLI argument definitions.
//!
//! Muster has a deliberately small surface: one optional path to the
//! requirements file plus output/logging switches. The process exit
//! status is the authoritative pass/fail signal for scripting.

use clap::Parser;
use std::path::PathBuf;

/// Muster - declarative workstation provisioning checker.
#[derive(Debug, Parser)]
#[command(name = "muster")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the requirements file (overrides config/requirements.yaml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Show warnings, errors, and the final summary only
    #[arg(short, long)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Validate the requirements file and exit without running checks
    #[arg(long)]
    pub lint: bool,
}
