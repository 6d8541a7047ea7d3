//! Terminal output.
//!
//! The engine streams one line per check or remediation as it happens;
//! this module decides which of those lines are shown and how they are
//! styled. Respects `NO_COLOR` via the `console` crate.

use console::style;
use std::str::FromStr;

/// Output verbosity mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Show every check, configuration step, and separator.
    #[default]
    Normal,
    /// Show warnings, errors, and the final summary only.
    Quiet,
    /// Show nothing except errors.
    Silent,
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "normal" => Ok(Self::Normal),
            "quiet" => Ok(Self::Quiet),
            "silent" => Ok(Self::Silent),
            _ => Err(format!("unknown output mode: {}", s)),
        }
    }
}

impl OutputMode {
    /// Check if this mode shows per-check progress lines.
    pub fn shows_progress(&self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Check if this mode shows warnings and summary lines.
    pub fn shows_status(&self) -> bool {
        !matches!(self, Self::Silent)
    }
}

/// Output writer that respects output mode.
#[derive(Debug, Default)]
pub struct Output {
    mode: OutputMode,
}

impl Output {
    /// Create a new output writer.
    pub fn new(mode: OutputMode) -> Self {
        Self { mode }
    }

    /// Get the output mode.
    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Run banner, shown once at startup.
    pub fn banner(&self, text: &str) {
        if self.mode.shows_progress() {
            println!("\n{}\n", style(text).yellow().bold());
        }
    }

    /// Header for a single check: name and required version.
    pub fn check_header(&self, display: &str, requirement: &str) {
        if self.mode.shows_progress() {
            println!(
                "{} {} {}",
                style(display).cyan(),
                style(requirement).magenta(),
                style("check:").cyan()
            );
        }
    }

    /// A progress line (e.g. "Installing newer version of Git...").
    pub fn status(&self, msg: &str) {
        if self.mode.shows_progress() {
            println!("{}", msg);
        }
    }

    /// A successful per-check outcome.
    pub fn success(&self, msg: &str) {
        if self.mode.shows_progress() {
            println!("{}", style(msg).green());
        }
    }

    /// A non-fatal problem worth seeing even in quiet mode.
    pub fn warning(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", style(msg).yellow());
        }
    }

    /// A failure. Always printed, to stderr.
    pub fn error(&self, msg: &str) {
        eprintln!("{}", style(msg).red());
    }

    /// A summary line. Shown unless silent.
    pub fn result(&self, msg: &str) {
        if self.mode.shows_status() {
            println!("{}", style(msg).green());
        }
    }

    /// Visual separator between checks.
    pub fn separator(&self) {
        if self.mode.shows_progress() {
            println!("--------------------");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_mode_from_str() {
        assert_eq!("normal".parse::<OutputMode>(), Ok(OutputMode::Normal));
        assert_eq!("QUIET".parse::<OutputMode>(), Ok(OutputMode::Quiet));
        assert_eq!("Silent".parse::<OutputMode>(), Ok(OutputMode::Silent));
        assert!("invalid".parse::<OutputMode>().is_err());
    }

    #[test]
    fn normal_shows_everything() {
        assert!(OutputMode::Normal.shows_progress());
        assert!(OutputMode::Normal.shows_status());
    }

    #[test]
    fn quiet_hides_progress_keeps_status() {
        assert!(!OutputMode::Quiet.shows_progress());
        assert!(OutputMode::Quiet.shows_status());
    }

    #[test]
    fn silent_hides_all_but_errors() {
        assert!(!OutputMode::Silent.shows_progress());
        assert!(!OutputMode::Silent.shows_status());
    }

    #[test]
    fn output_reports_its_mode() {
        let output = Output::new(OutputMode::Quiet);
        assert_eq!(output.mode(), OutputMode::Quiet);
    }
}
