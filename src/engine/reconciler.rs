//! The requirement reconciliation engine.
//!
//! One run walks three strictly sequential phases:
//!
//! 1. **Installer setup & configuration**: each installer is
//!    version-checked, bootstrapped via its platform setup command when
//!    out of date, and its configuration commands are run.
//! 2. **Authentication checks**: each block's checks run; results are
//!    reported and nothing else.
//! 3. **Package check & remediate**: each package's installed version
//!    is compared against its requirement; out-of-date packages are
//!    installed through their resolved installer.
//!
//! Only phase 3 touches the [`RunOutcome`]: a failed installer setup or
//! configuration command is reported but never counted in the final
//! tally. Every command outcome is printed as it happens; per-step
//! failures never abort the run.

use crate::config::{ResolvedAuth, ResolvedConfig, ResolvedInstaller, ResolvedPackage};
use crate::engine::outcome::RunOutcome;
use crate::shell::{CommandResult, CommandRunner, Platform};
use crate::ui::Output;
use crate::version::{self, VersionCheck};
use std::time::Duration;

/// Reconciles the machine against a resolved configuration.
pub struct Reconciler<'a> {
    config: &'a ResolvedConfig,
    runner: &'a dyn CommandRunner,
    output: &'a Output,
    platform: Platform,
}

impl<'a> Reconciler<'a> {
    /// Create a reconciler for the current platform.
    pub fn new(config: &'a ResolvedConfig, runner: &'a dyn CommandRunner, output: &'a Output) -> Self {
        Self::with_platform(config, runner, output, Platform::current())
    }

    /// Create a reconciler for an explicit platform.
    pub fn with_platform(
        config: &'a ResolvedConfig,
        runner: &'a dyn CommandRunner,
        output: &'a Output,
        platform: Platform,
    ) -> Self {
        Self {
            config,
            runner,
            output,
            platform,
        }
    }

    /// Run all three phases and return the outcome tally.
    pub fn run(&self) -> RunOutcome {
        self.configure_installers();
        self.check_authentications();

        let mut outcome = RunOutcome::default();
        self.reconcile_packages(&mut outcome);
        outcome
    }

    /// Phase 1: version-check, bootstrap, and configure each installer.
    fn configure_installers(&self) {
        for installer in &self.config.installers {
            self.output
                .check_header(&installer.display, &installer.requirement.to_string());

            let command = format!("{} {}", installer.name, installer.version_extraction);
            let result = self.run_command(&command);
            let extracted = result.trimmed_stdout();

            match version::check(extracted, &installer.requirement) {
                VersionCheck::Satisfied => {
                    self.output.success(&format!("Found {}!", extracted));
                }
                VersionCheck::Invalid { found } => {
                    self.report_invalid_version(&found);
                }
                VersionCheck::Unsatisfied => {
                    if !extracted.is_empty() {
                        self.output.warning(&format!("Found {}!", extracted));
                    }
                    self.setup_installer(installer);
                }
            }

            for command in &installer.configurations {
                let result = self.run_command(command);
                if result.success {
                    self.output
                        .success(&format!("Installer configuration: {}", command));
                } else {
                    self.report_exit(&result);
                    self.output.error(&format!("Failed to run: {}", command));
                }
            }
        }
        self.output.separator();
    }

    /// Bootstrap an out-of-date installer via its platform setup command.
    fn setup_installer(&self, installer: &ResolvedInstaller) {
        let Some(setup) = &installer.setup else {
            self.output.warning(&format!(
                "{} is out of date and has no setup command",
                installer.display
            ));
            return;
        };

        let Some(command) = setup.for_platform(self.platform) else {
            self.output.error(&format!(
                "{} setup is not supported on platform '{}'",
                installer.display, self.platform
            ));
            return;
        };

        self.output
            .status(&format!("Setting up {}...", installer.display));
        let result = self.run_command(command);
        if result.success {
            self.output.success("Success!");
        } else {
            self.report_exit(&result);
            self.output
                .error(&format!("{} setup failed.", installer.display));
        }
    }

    /// Phase 2: report presence of each authentication block.
    ///
    /// Purely diagnostic; there is no command that could "install" a
    /// credential, and the outcome tally is never touched.
    fn check_authentications(&self) {
        for auth in &self.config.authentications {
            let failed = self.failed_auth_checks(auth);

            if failed.is_empty() {
                self.output.success(&format!("{}: present", auth.display));
            } else {
                self.output.warning(&format!("{}: absent", auth.display));
                for check in failed {
                    self.output.status(&format!("  failed: {}", check));
                }
            }
            self.output.separator();
        }
    }

    fn failed_auth_checks<'b>(&self, auth: &'b ResolvedAuth) -> Vec<&'b str> {
        auth.checks
            .iter()
            .filter(|check| !self.run_command(check).success)
            .map(String::as_str)
            .collect()
    }

    /// Phase 3: check every package and remediate the out-of-date ones.
    fn reconcile_packages(&self, outcome: &mut RunOutcome) {
        for package in &self.config.packages {
            self.output
                .check_header(&package.display, &package.requirement.to_string());

            let command = format!("{} {}", package.check_command, package.version_extraction);
            let result = self.run_command(&command);
            let extracted = result.trimmed_stdout();

            match version::check(extracted, &package.requirement) {
                VersionCheck::Satisfied => {
                    self.output.success(&format!("Found {}!", extracted));
                    outcome.successes += 1;
                }
                VersionCheck::Invalid { found } => {
                    // Neither a success nor a failure: remediating on top
                    // of a broken extraction command would never converge.
                    self.report_invalid_version(&found);
                }
                VersionCheck::Unsatisfied => {
                    if !extracted.is_empty() {
                        self.output.warning(&format!("Found {}!", extracted));
                    }
                    self.output.status(&format!(
                        "Installing newer version of {}...",
                        package.display
                    ));
                    self.install_package(package, outcome);
                }
            }

            self.output.separator();
        }
    }

    /// Remediate one package through its resolved installer.
    fn install_package(&self, package: &ResolvedPackage, outcome: &mut RunOutcome) {
        let Some(installer) = self.config.installer(&package.installer) else {
            // Unreachable after validation; count it rather than panic.
            self.output.error(&format!(
                "Unknown installer '{}' for {}",
                package.installer, package.display
            ));
            outcome.failures += 1;
            return;
        };

        let command = format!("{} {}", installer.command, package.install_name);
        let result = self.run_command(&command);

        if result.success {
            outcome.successes += 1;
            outcome.installs += 1;
            self.output.success("Success!");
        } else {
            outcome.failures += 1;
            self.report_exit(&result);
            self.output.error("Installation failed.");
        }
    }

    /// Run one command, downgrading a spawn failure to a failed result
    /// so a broken shell on one step cannot abort the whole run.
    fn run_command(&self, command: &str) -> CommandResult {
        tracing::debug!("running `{}`", command);
        match self.runner.run(command) {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!("failed to spawn `{}`: {}", command, err);
                CommandResult::failure(None, String::new(), err.to_string(), Duration::ZERO)
            }
        }
    }

    fn report_exit(&self, result: &CommandResult) {
        match result.exit_code {
            Some(code) => self.output.error(&format!("Exit code: {}", code)),
            None => self.output.error("Terminated by signal"),
        }
    }

    fn report_invalid_version(&self, found: &str) {
        self.output.error(&format!(
            "Extracted version number ({}) appears to be an invalid format. \
             Consider updating your version extraction command.",
            found
        ));
    }
}
