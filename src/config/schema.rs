//! Configuration schema definitions for Muster.
//!
//! This module contains the struct definitions that map to the
//! requirements YAML file format. The file shape is compatibility-fixed:
//! top-level keys `version`, `installers`, `packages`, `authentications`,
//! and `requirements`.

use crate::shell::Platform;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

/// Reserved entry under `packages` that supplies the fallback installer
/// name and is not itself a package.
pub const DEFAULT_PACKAGE_KEY: &str = "default";

/// A map that preserves YAML declaration order.
///
/// Installers are configured and packages are checked in the order the
/// operator wrote them, and later packages reference earlier installers
/// by name, so a hash map would scramble run semantics. Duplicate keys
/// are rejected at parse time.
#[derive(Debug, Clone, Default)]
pub struct OrderedMap<T>(Vec<(String, T)>);

impl<T> OrderedMap<T> {
    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether the map contains `key`.
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrderedMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<T> {
            type Value = OrderedMap<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a mapping with unique keys")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, T)> =
                    Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, T>()? {
                    if entries.iter().any(|(k, _)| *k == key) {
                        return Err(serde::de::Error::custom(format!(
                            "duplicate key: {}",
                            key
                        )));
                    }
                    entries.push((key, value));
                }
                Ok(OrderedMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Root configuration structure for the requirements file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MusterConfig {
    /// Shown in the startup banner; no semantic effect.
    pub version: String,

    /// Installer definitions, in declaration order.
    pub installers: OrderedMap<InstallerConfig>,

    /// Package definitions, in declaration order. May contain the
    /// reserved `default` entry.
    pub packages: OrderedMap<PackageConfig>,

    /// Authentication blocks, in declaration order.
    pub authentications: OrderedMap<AuthConfig>,

    /// Minimum required version per installer/package name.
    /// Lookup-only, so declaration order does not matter here.
    pub requirements: HashMap<String, String>,
}

/// An installer: a tool that can install packages, with its own version
/// requirement and optional bootstrap/configuration commands.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InstallerConfig {
    /// Human-readable name.
    pub display: String,

    /// Install command prefix; the package's install name is appended.
    pub command: String,

    /// Suffix appended to the installer name to print its version.
    pub version_extraction: String,

    /// Per-platform bootstrap command, run when the installer is
    /// missing or out of date.
    pub setup: Option<SetupCommands>,

    /// Commands run unconditionally before any checks.
    pub configurations: Vec<String>,
}

/// Platform-keyed installer bootstrap commands.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SetupCommands {
    pub mac: Option<String>,
    pub linux: Option<String>,
}

impl SetupCommands {
    /// The setup command for `platform`, if one is configured.
    ///
    /// Windows never resolves: there is no supported command set for it.
    pub fn for_platform(&self, platform: Platform) -> Option<&str> {
        match platform {
            Platform::MacOS => self.mac.as_deref(),
            Platform::Linux => self.linux.as_deref(),
            Platform::Windows => None,
        }
    }
}

/// A package: a tool checked for a minimum version and installed via an
/// installer when out of date.
///
/// The reserved `default` entry only carries `installer`; every other
/// field is validated as required for real packages.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PackageConfig {
    /// Human-readable name.
    pub display: String,

    /// Base command invoked (with `version_extraction` appended) to
    /// determine the installed version.
    pub command: String,

    /// Suffix appended to `command` to print the installed version.
    pub version_extraction: String,

    /// Installer override; falls back to `packages.default.installer`.
    pub installer: Option<String>,

    /// Name handed to the installer; falls back to `command`.
    pub install_command: Option<String>,
}

/// A named group of shell checks verifying that a credential or
/// permission artifact is present. Diagnostic only.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Human-readable name.
    pub display: String,

    /// Every check must exit zero for the block to count as present.
    pub checks: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_map_preserves_declaration_order() {
        let yaml = "z: 1\na: 2\nm: 3";
        let map: OrderedMap<u32> = serde_yaml::from_str(yaml).unwrap();
        let keys: Vec<&str> = map.keys().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn ordered_map_rejects_duplicate_keys() {
        let yaml = "a: 1\nb: 2\na: 3";
        let result: Result<OrderedMap<u32>, _> = serde_yaml::from_str(yaml);
        assert!(result.unwrap_err().to_string().contains("duplicate"));
    }

    #[test]
    fn ordered_map_lookup() {
        let yaml = "brew: 1\napt: 2";
        let map: OrderedMap<u32> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(map.get("apt"), Some(&2));
        assert!(map.get("yum").is_none());
        assert!(map.contains_key("brew"));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn parses_full_config() {
        let yaml = r#"
version: "1.2"
installers:
  brew:
    display: Homebrew
    command: brew install
    version_extraction: "--version | head -n1"
    setup:
      mac: /bin/bash -c "$(curl -fsSL https://example.com/install.sh)"
    configurations:
      - brew update
packages:
  default:
    installer: brew
  git:
    display: Git
    command: git
    version_extraction: "--version | cut -d' ' -f3"
    install_command: git-core
authentications:
  ssh:
    display: SSH key
    checks:
      - test -f ~/.ssh/id_ed25519
requirements:
  brew: "2.0"
  git: "2.20"
"#;
        let config: MusterConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.version, "1.2");
        assert_eq!(config.installers.len(), 1);
        assert_eq!(config.packages.len(), 2);
        assert_eq!(
            config.packages.get("default").unwrap().installer.as_deref(),
            Some("brew")
        );
        assert_eq!(
            config.packages.get("git").unwrap().install_command.as_deref(),
            Some("git-core")
        );
        assert_eq!(config.requirements["git"], "2.20");
    }

    #[test]
    fn setup_commands_resolve_per_platform() {
        let setup = SetupCommands {
            mac: Some("brew-bootstrap".into()),
            linux: None,
        };
        assert_eq!(setup.for_platform(Platform::MacOS), Some("brew-bootstrap"));
        assert_eq!(setup.for_platform(Platform::Linux), None);
        assert_eq!(setup.for_platform(Platform::Windows), None);
    }

    #[test]
    fn missing_sections_default_to_empty() {
        let config: MusterConfig = serde_yaml::from_str("version: \"0.1\"").unwrap();
        assert!(config.installers.is_empty());
        assert!(config.packages.is_empty());
        assert!(config.authentications.is_empty());
        assert!(config.requirements.is_empty());
    }
}
