//! Navigation port

use url::Url;

use super::ProtocolError;

/// Sends the user agent to another URL.
pub trait Navigator: Send + Sync {
    /// Navigates to `url`.
    ///
    /// # Errors
    /// Returns `ProtocolError::Navigation` if the URL cannot be opened.
    fn navigate(&self, url: &Url) -> Result<(), ProtocolError>;
}
