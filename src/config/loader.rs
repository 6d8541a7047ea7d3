//! Requirements file loading.

use crate::config::schema::MusterConfig;
use crate::error::{MusterError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Default requirements file location, relative to the installation root.
pub const DEFAULT_CONFIG_PATH: &str = "config/requirements.yaml";

/// Resolve the requirements file path from an optional CLI override.
pub fn config_path(cli_override: Option<&Path>) -> PathBuf {
    cli_override
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load and parse a requirements file.
///
/// # Errors
///
/// Returns `ConfigNotFound` if the file doesn't exist and `ConfigParse`
/// if the YAML is invalid.
pub fn load_config(path: &Path) -> Result<MusterConfig> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MusterError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            MusterError::Io(e)
        }
    })?;

    parse_config(&content, path)
}

/// Parse requirements YAML into the typed configuration model.
pub fn parse_config(content: &str, path: &Path) -> Result<MusterConfig> {
    serde_yaml::from_str(content).map_err(|e| MusterError::ConfigParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}
