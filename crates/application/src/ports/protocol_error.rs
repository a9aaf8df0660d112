//! Identity protocol errors

use solid_auth_domain::DomainError;

use super::StorageError;

/// Errors produced by the identity protocol adapters.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Transport-level failure talking to the provider.
    #[error("network error: {0}")]
    Network(String),

    /// The provider configuration could not be discovered.
    #[error("discovery failed for {idp}: {message}")]
    Discovery {
        /// Identity provider.
        idp: String,
        /// Failure description.
        message: String,
    },

    /// Dynamic client registration failed.
    #[error("client registration failed: {0}")]
    Registration(String),

    /// No redirect URI was supplied and none could be derived.
    #[error("no redirect URI available for the authorization request")]
    MissingRedirectUri,

    /// The provider answered with an OAuth error.
    #[error("identity provider error: {error}")]
    Provider {
        /// OAuth error code.
        error: String,
        /// Optional description.
        description: Option<String>,
    },

    /// The callback does not belong to the pending authorization request.
    #[error("callback state does not match the pending authorization request")]
    StateMismatch,

    /// The identity token failed validation.
    #[error("invalid identity token: {0}")]
    InvalidIdToken(String),

    /// The client certificate could not be loaded.
    #[error("client certificate error: {0}")]
    Certificate(String),

    /// The user agent could not be sent to the provider.
    #[error("navigation failed: {0}")]
    Navigation(String),

    /// Invalid protocol data.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Storage failed while the protocol persisted its state.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
