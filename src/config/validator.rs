//! Configuration validation rules.
//!
//! Structural errors abort the run before any command executes: nothing
//! downstream can proceed against a requirements file that references undeclared
//! installers or has no requirement entry for a checked name.

use crate::config::schema::{MusterConfig, DEFAULT_PACKAGE_KEY};
use crate::error::{MusterError, Result};
use crate::version::Version;

/// Validation error with context.
#[derive(Debug, Clone)]
pub struct ValidationError {
    /// Rule identifier
    pub rule: String,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    fn new(rule: &str, message: String) -> Self {
        Self {
            rule: rule.to_string(),
            message,
        }
    }
}

/// Validate a configuration and return all errors.
///
/// Collects every violation rather than stopping at the first one, so
/// operators can fix a broken requirements file in one pass.
pub fn validate_config(config: &MusterConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    errors.extend(validate_installers(config));
    errors.extend(validate_packages(config));
    errors.extend(validate_authentications(config));
    errors.extend(validate_requirements(config));

    errors
}

/// Validate a configuration, failing on the first batch of errors.
pub fn validate(config: &MusterConfig) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        return Ok(());
    }

    let messages: Vec<String> = errors.into_iter().map(|e| e.message).collect();
    Err(MusterError::ConfigValidation {
        message: messages.join("; "),
    })
}

fn validate_installers(config: &MusterConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, installer) in config.installers.iter() {
        if installer.command.is_empty() {
            errors.push(ValidationError::new(
                "missing-command",
                format!("Installer '{}' must have a 'command'", name),
            ));
        }
        if installer.version_extraction.is_empty() {
            errors.push(ValidationError::new(
                "missing-version-extraction",
                format!("Installer '{}' must have a 'version_extraction'", name),
            ));
        }
        if !config.requirements.contains_key(name) {
            errors.push(ValidationError::new(
                "missing-requirement",
                format!("Installer '{}' has no entry under 'requirements'", name),
            ));
        }
    }

    errors
}

fn validate_packages(config: &MusterConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let default_installer = config
        .packages
        .get(DEFAULT_PACKAGE_KEY)
        .and_then(|d| d.installer.as_deref());

    if let Some(installer) = default_installer {
        if !config.installers.contains_key(installer) {
            errors.push(ValidationError::new(
                "unknown-installer",
                format!(
                    "packages.default names installer '{}' which is not declared",
                    installer
                ),
            ));
        }
    }

    for (name, package) in config.packages.iter() {
        if name == DEFAULT_PACKAGE_KEY {
            continue;
        }

        // Installers and packages share the requirements namespace, so a
        // name living in both would make the requirement lookup ambiguous.
        if config.installers.contains_key(name) {
            errors.push(ValidationError::new(
                "name-collision",
                format!("'{}' is declared as both an installer and a package", name),
            ));
        }

        if package.command.is_empty() {
            errors.push(ValidationError::new(
                "missing-command",
                format!("Package '{}' must have a 'command'", name),
            ));
        }
        if package.version_extraction.is_empty() {
            errors.push(ValidationError::new(
                "missing-version-extraction",
                format!("Package '{}' must have a 'version_extraction'", name),
            ));
        }
        if !config.requirements.contains_key(name) {
            errors.push(ValidationError::new(
                "missing-requirement",
                format!("Package '{}' has no entry under 'requirements'", name),
            ));
        }

        match &package.installer {
            Some(installer) => {
                if !config.installers.contains_key(installer) {
                    errors.push(ValidationError::new(
                        "unknown-installer",
                        format!(
                            "Package '{}' names installer '{}' which is not declared",
                            name, installer
                        ),
                    ));
                }
            }
            None => {
                if default_installer.is_none() {
                    errors.push(ValidationError::new(
                        "missing-default-installer",
                        format!(
                            "Package '{}' has no installer and packages.default.installer is not set",
                            name
                        ),
                    ));
                }
            }
        }
    }

    errors
}

fn validate_authentications(config: &MusterConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, auth) in config.authentications.iter() {
        if auth.checks.is_empty() {
            errors.push(ValidationError::new(
                "empty-auth",
                format!("Authentication '{}' must declare at least one check", name),
            ));
        }
    }

    errors
}

/// Required versions come from trusted configuration, but a typo there
/// would otherwise only surface mid-run as a confusing comparison
/// failure. Parse them all up front.
fn validate_requirements(config: &MusterConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    for (name, required) in &config.requirements {
        if required.parse::<Version>().is_err() {
            errors.push(ValidationError::new(
                "invalid-requirement",
                format!(
                    "Requirement for '{}' is not a valid version: '{}'",
                    name, required
                ),
            ));
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> MusterConfig {
        serde_yaml::from_str(yaml).unwrap()
    }

    const VALID: &str = r#"
version: "1.0"
installers:
  brew:
    display: Homebrew
    command: brew install
    version_extraction: "--version"
packages:
  default:
    installer: brew
  git:
    display: Git
    command: git
    version_extraction: "--version | cut -d' ' -f3"
authentications:
  ssh:
    checks:
      - test -f ~/.ssh/id_ed25519
requirements:
  brew: "2.0"
  git: "2.20"
"#;

    fn rules(config: &MusterConfig) -> Vec<String> {
        validate_config(config).into_iter().map(|e| e.rule).collect()
    }

    #[test]
    fn valid_config_passes() {
        let config = parse(VALID);
        assert!(validate_config(&config).is_empty());
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn missing_requirement_entry_is_an_error() {
        let mut yaml = VALID.replace("  git: \"2.20\"\n", "");
        yaml.push('\n');
        let config = parse(&yaml);
        assert!(rules(&config).contains(&"missing-requirement".to_string()));
    }

    #[test]
    fn unknown_installer_reference_is_an_error() {
        let yaml = VALID.replace("installer: brew", "installer: yum");
        let config = parse(&yaml);
        assert!(rules(&config).contains(&"unknown-installer".to_string()));
    }

    #[test]
    fn package_without_installer_needs_default() {
        let yaml = VALID.replace("  default:\n    installer: brew\n", "");
        let config = parse(&yaml);
        assert!(rules(&config).contains(&"missing-default-installer".to_string()));
    }

    #[test]
    fn installer_package_name_collision_is_an_error() {
        let config = parse(
            r#"
installers:
  git:
    command: git install
    version_extraction: "--version"
packages:
  default:
    installer: git
  git:
    command: git
    version_extraction: "--version"
requirements:
  git: "2.20"
"#,
        );
        assert!(rules(&config).contains(&"name-collision".to_string()));
    }

    #[test]
    fn malformed_requirement_is_an_error() {
        let yaml = VALID.replace("git: \"2.20\"", "git: \"latest\"");
        let config = parse(&yaml);
        assert!(rules(&config).contains(&"invalid-requirement".to_string()));
    }

    #[test]
    fn empty_auth_block_is_an_error() {
        let yaml = VALID.replace(
            "    checks:\n      - test -f ~/.ssh/id_ed25519\n",
            "    checks: []\n",
        );
        let config = parse(&yaml);
        assert!(rules(&config).contains(&"empty-auth".to_string()));
    }

    #[test]
    fn package_missing_command_is_an_error() {
        let yaml = VALID.replace("    command: git\n", "");
        let config = parse(&yaml);
        assert!(rules(&config).contains(&"missing-command".to_string()));
    }

    #[test]
    fn all_errors_collected_at_once() {
        let config = parse(
            r#"
packages:
  git:
    display: Git
requirements:
  git: "not a version"
"#,
        );
        let errors = validate_config(&config);
        assert!(errors.len() >= 3);
    }

    #[test]
    fn validate_joins_messages() {
        let config = parse("packages:\n  git:\n    command: git\n");
        let err = validate(&config).unwrap_err();
        assert!(err.to_string().contains("git"));
    }
}
