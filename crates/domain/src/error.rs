//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation or parsing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The provided URL is invalid or malformed.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The HTTP method is not supported.
    #[error("unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// A token could not be decoded.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Callback parameters returned by an identity provider are malformed.
    #[error("invalid callback: {0}")]
    InvalidCallback(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
