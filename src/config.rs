//! Credentials file loading
//!
//! Resolves where the credentials JSON lives and decodes it into
//! [`Credentials`]. Missing keys are rejected here rather than deep inside
//! the login request.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::models::Credentials;
use crate::utils::format_path;

/// Location under the home directory used when no path is given
pub const DEFAULT_CONFIG_RELATIVE: &str = "dotfiles/.bin/we_usage.json";

/// Example shown to the user when the credentials file is missing
pub const CONFIG_TEMPLATE: &str = r#"{
    "username": "FBB0211122233",
    "password": "your_password"
}"#;

pub fn default_config_path() -> PathBuf {
    let home = directories::BaseDirs::new()
        .map(|b| b.home_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("~"));
    home.join(DEFAULT_CONFIG_RELATIVE)
}

/// Pick the explicit path when present, otherwise the default location.
pub fn resolve_config_path(path_override: Option<&Path>) -> PathBuf {
    match path_override {
        Some(p) => p.to_path_buf(),
        None => default_config_path(),
    }
}

/// Read and decode the credentials file.
pub fn load_credentials(path: &Path) -> Result<Credentials, ConfigError> {
    log::debug!("loading credentials from {}", format_path(path));
    let contents = fs::read_to_string(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ConfigError::NotFound {
            path: path.to_path_buf(),
        },
        _ => ConfigError::Unreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    serde_json::from_str(&contents).map_err(|source| ConfigError::Malformed {
        path: path.to_path_buf(),
        source,
    })
}

/// Text printed when loading fails, mirroring what the user needs to fix it.
pub fn config_error_message(err: &ConfigError) -> String {
    match err {
        ConfigError::NotFound { .. } => format!(
            "❌ {err}\nPlease create it with your credentials in this format:\n{CONFIG_TEMPLATE}"
        ),
        _ => format!("❌ {err}"),
    }
}
