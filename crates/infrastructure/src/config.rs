//! Client settings loading.
//!
//! Settings come from a JSON file in the platform-specific config directory
//! (or an explicit path), then environment variables override single fields:
//! - Linux: ~/.config/solid-auth/config.json
//! - macOS: ~/Library/Application Support/solid-auth/config.json
//! - Windows: %APPDATA%/solid-auth/config.json

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use solid_auth_domain::ClientSettings;

/// Overrides `client_id`.
pub const ENV_CLIENT_ID: &str = "SOLID_AUTH_CLIENT_ID";
/// Overrides `redirect_uri`.
pub const ENV_REDIRECT_URI: &str = "SOLID_AUTH_REDIRECT_URI";
/// Overrides `current_url`.
pub const ENV_CURRENT_URL: &str = "SOLID_AUTH_CURRENT_URL";
/// Overrides `storage_path`.
pub const ENV_STORAGE_PATH: &str = "SOLID_AUTH_STORAGE_PATH";
/// Overrides `request_timeout_secs`.
pub const ENV_TIMEOUT_SECS: &str = "SOLID_AUTH_TIMEOUT_SECS";

/// Error type for settings loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("cannot read {path}: {source}")]
    Io {
        /// Settings file.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },

    /// The settings file is not valid JSON for `ClientSettings`.
    #[error("invalid settings in {path}: {source}")]
    Parse {
        /// Settings file.
        path: PathBuf,
        /// Underlying error.
        source: serde_json::Error,
    },

    /// An environment override has an unusable value.
    #[error("invalid value for {name}: {value}")]
    InvalidValue {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Returns the default settings file path, if a config directory is known.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("solid-auth").join("config.json"))
}

/// Loads settings from `path` (or the default path) and the process
/// environment.
///
/// A missing default file yields default settings; a missing explicit file
/// is an error.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed, or an override is
/// invalid.
pub fn load_settings(path: Option<&Path>) -> Result<ClientSettings, ConfigError> {
    let settings = match path {
        Some(path) => read_settings(path)?,
        None => match default_config_path() {
            Some(path) if path.exists() => read_settings(&path)?,
            _ => ClientSettings::default(),
        },
    };
    apply_env_overrides(settings, |name| std::env::var(name).ok())
}

/// Reads settings from a JSON file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_settings(path: &Path) -> Result<ClientSettings, ConfigError> {
    let content = fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&content).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Applies environment overrides read through `lookup`. Empty values are
/// ignored.
///
/// # Errors
/// Returns `ConfigError::InvalidValue` if the timeout is not a positive
/// integer.
pub fn apply_env_overrides(
    mut settings: ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<ClientSettings, ConfigError> {
    let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

    if let Some(client_id) = var(ENV_CLIENT_ID) {
        settings.client_id = Some(client_id);
    }
    if let Some(redirect_uri) = var(ENV_REDIRECT_URI) {
        settings.redirect_uri = Some(redirect_uri);
    }
    if let Some(current_url) = var(ENV_CURRENT_URL) {
        settings.current_url = Some(current_url);
    }
    if let Some(storage_path) = var(ENV_STORAGE_PATH) {
        settings.storage_path = Some(PathBuf::from(storage_path));
    }
    if let Some(timeout) = var(ENV_TIMEOUT_SECS) {
        settings.request_timeout_secs = timeout
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|secs| *secs > 0)
            .ok_or(ConfigError::InvalidValue {
                name: ENV_TIMEOUT_SECS,
                value: timeout,
            })?;
    }
    Ok(settings)
}
