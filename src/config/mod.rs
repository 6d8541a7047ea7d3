//! Configuration loading, validation, and resolution for Muster.
//!
//! - Schema definitions in [`schema`]
//! - File loading in [`loader`]
//! - Cross-reference validation in [`validator`]
//! - Fallback resolution in [`resolved`]
//!
//! # Example
//!
//! ```
//! use muster::config::{parse_config, validate, ResolvedConfig};
//! use std::path::Path;
//!
//! let yaml = r#"
//! installers:
//!   brew:
//!     command: brew install
//!     version_extraction: "--version"
//! packages:
//!   default:
//!     installer: brew
//!   git:
//!     command: git
//!     version_extraction: "--version | cut -d' ' -f3"
//! requirements:
//!   brew: "2.0"
//!   git: "2.20"
//! "#;
//!
//! let config = parse_config(yaml, Path::new("requirements.yaml")).unwrap();
//! validate(&config).unwrap();
//! let resolved = ResolvedConfig::from_config(&config).unwrap();
//! assert_eq!(resolved.packages[0].installer, "brew");
//! ```

pub mod loader;
pub mod resolved;
pub mod schema;
pub mod validator;

// Schema re-exports
pub use schema::{
    AuthConfig, InstallerConfig, MusterConfig, OrderedMap, PackageConfig, SetupCommands,
    DEFAULT_PACKAGE_KEY,
};

// Loader re-exports
pub use loader::{config_path, load_config, parse_config, DEFAULT_CONFIG_PATH};

// Validator re-exports
pub use validator::{validate, validate_config, ValidationError};

// Resolved re-exports
pub use resolved::{ResolvedAuth, ResolvedConfig, ResolvedInstaller, ResolvedPackage};
