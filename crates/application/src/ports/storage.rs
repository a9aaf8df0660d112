//! Storage adapter port
//!
//! A minimal string key-value capability. Ephemeral and durable adapters are
//! interchangeable behind it; both must round-trip values exactly.

/// Errors that can occur in a storage adapter.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// I/O error.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("storage serialization error: {0}")]
    Serialization(String),

    /// The backend rejected the operation.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Key-value storage used to hold session data.
///
/// Operations are synchronous; callers compose them between the awaited
/// protocol steps.
pub trait StorageAdapter: Send + Sync {
    /// Reads a value.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a value. Removing a missing key is not an error.
    ///
    /// # Errors
    /// Returns an error if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}
