//! CLI error type

use solid_auth_application::ApplicationError;
use solid_auth_application::ports::{FetchError, ProtocolError};
use solid_auth_infrastructure::ConfigError;

/// Errors reported by the command-line client.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Settings could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A broker operation failed.
    #[error(transparent)]
    Broker(#[from] ApplicationError),

    /// A protocol adapter could not be set up.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The resource request failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The HTTP client could not be built.
    #[error("cannot build HTTP client: {0}")]
    HttpClient(String),

    /// An argument or setting has an unusable value.
    #[error("invalid {name}: {value}")]
    InvalidArgument {
        /// What was invalid.
        name: &'static str,
        /// Offending value.
        value: String,
    },

    /// Writing command output failed.
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),

    /// No storage path is configured and none can be derived.
    #[error("no storage path configured and no data directory found; use --ephemeral or set storage_path")]
    NoStoragePath,
}

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;
