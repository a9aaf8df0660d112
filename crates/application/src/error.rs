//! Application error types

use thiserror::Error;

use crate::ports::{ProtocolError, StorageError};

/// Errors surfaced by the session broker.
///
/// The broker only sequences its collaborators, so every variant forwards
/// the collaborator's error unchanged.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// A storage adapter failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// An identity protocol failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
