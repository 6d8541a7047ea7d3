//! Load-time resolution of optional configuration fields.
//!
//! Fallbacks (default installer, install name, display name) are
//! resolved once here instead of being re-derived at every access site
//! during the run. The engine only ever sees fully-resolved entries.

use crate::config::schema::{MusterConfig, SetupCommands, DEFAULT_PACKAGE_KEY};
use crate::error::{MusterError, Result};
use crate::version::Version;

/// An installer with every fallback applied.
#[derive(Debug, Clone)]
pub struct ResolvedInstaller {
    pub name: String,
    pub display: String,
    /// Install command prefix for packages using this installer.
    pub command: String,
    pub version_extraction: String,
    pub setup: Option<SetupCommands>,
    pub configurations: Vec<String>,
    pub requirement: Version,
}

/// A package with every fallback applied.
#[derive(Debug, Clone)]
pub struct ResolvedPackage {
    pub name: String,
    pub display: String,
    /// Command the version check runs (with `version_extraction` appended).
    pub check_command: String,
    pub version_extraction: String,
    /// Name of the installer used for remediation.
    pub installer: String,
    /// Name handed to the installer's command for remediation.
    pub install_name: String,
    pub requirement: Version,
}

/// An authentication block with display fallback applied.
#[derive(Debug, Clone)]
pub struct ResolvedAuth {
    pub name: String,
    pub display: String,
    pub checks: Vec<String>,
}

/// A validated configuration in engine-ready form.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub version: String,
    pub installers: Vec<ResolvedInstaller>,
    pub packages: Vec<ResolvedPackage>,
    pub authentications: Vec<ResolvedAuth>,
}

impl ResolvedConfig {
    /// Resolve a configuration that already passed
    /// [`validate`](crate::config::validate).
    ///
    /// Broken references still surface as `ConfigValidation` errors
    /// rather than panics, so calling this on an unvalidated config is
    /// safe, just less informative.
    pub fn from_config(config: &MusterConfig) -> Result<Self> {
        let default_installer = config
            .packages
            .get(DEFAULT_PACKAGE_KEY)
            .and_then(|d| d.installer.clone());

        let mut installers = Vec::with_capacity(config.installers.len());
        for (name, installer) in config.installers.iter() {
            installers.push(ResolvedInstaller {
                name: name.to_string(),
                display: display_or(&installer.display, name),
                command: installer.command.clone(),
                version_extraction: installer.version_extraction.clone(),
                setup: installer.setup.clone(),
                configurations: installer.configurations.clone(),
                requirement: required_version(config, name)?,
            });
        }

        let mut packages = Vec::new();
        for (name, package) in config.packages.iter() {
            if name == DEFAULT_PACKAGE_KEY {
                continue;
            }

            let installer = package
                .installer
                .clone()
                .or_else(|| default_installer.clone())
                .ok_or_else(|| MusterError::ConfigValidation {
                    message: format!("Package '{}' has no resolvable installer", name),
                })?;

            packages.push(ResolvedPackage {
                name: name.to_string(),
                display: display_or(&package.display, name),
                check_command: package.command.clone(),
                version_extraction: package.version_extraction.clone(),
                installer,
                install_name: package
                    .install_command
                    .clone()
                    .unwrap_or_else(|| package.command.clone()),
                requirement: required_version(config, name)?,
            });
        }

        let authentications = config
            .authentications
            .iter()
            .map(|(name, auth)| ResolvedAuth {
                name: name.to_string(),
                display: display_or(&auth.display, name),
                checks: auth.checks.clone(),
            })
            .collect();

        Ok(ResolvedConfig {
            version: config.version.clone(),
            installers,
            packages,
            authentications,
        })
    }

    /// Look up an installer by name.
    pub fn installer(&self, name: &str) -> Option<&ResolvedInstaller> {
        self.installers.iter().find(|i| i.name == name)
    }
}

fn display_or(display: &str, name: &str) -> String {
    if display.is_empty() {
        name.to_string()
    } else {
        display.to_string()
    }
}

fn required_version(config: &MusterConfig, name: &str) -> Result<Version> {
    let raw = config
        .requirements
        .get(name)
        .ok_or_else(|| MusterError::ConfigValidation {
            message: format!("'{}' has no entry under 'requirements'", name),
        })?;

    raw.parse().map_err(|_| MusterError::ConfigValidation {
        message: format!("Requirement for '{}' is not a valid version: '{}'", name, raw),
    })
}
