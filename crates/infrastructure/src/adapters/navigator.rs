//! Navigator adapter

use std::io::Write;

use solid_auth_application::ports::{Navigator, ProtocolError};
use tracing::info;
use url::Url;

/// Navigator that asks the user to open the URL.
///
/// Writes the URL to stderr so stdout stays usable for command output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNavigator;

impl ConsoleNavigator {
    /// Creates a console navigator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Navigator for ConsoleNavigator {
    fn navigate(&self, url: &Url) -> Result<(), ProtocolError> {
        info!(%url, "redirecting to identity provider");
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "Open this URL to log in:\n  {url}")
            .map_err(|e| ProtocolError::Navigation(e.to_string()))
    }
}
