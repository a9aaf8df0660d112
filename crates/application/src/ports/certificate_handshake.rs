//! Certificate handshake port (WebID-TLS)

use async_trait::async_trait;
use solid_auth_domain::Session;

use super::ProtocolError;

/// Establishes a session with a locally held client certificate.
///
/// The handshake is non-interactive; `Ok(None)` means the provider did not
/// recognize the client and the caller should try another method.
#[async_trait]
pub trait CertificateHandshake: Send + Sync {
    /// Attempts the handshake against `idp`.
    ///
    /// # Errors
    /// Returns an error if the attempt failed in a way that must not be
    /// treated as "no session".
    async fn login(&self, idp: &str) -> Result<Option<Session>, ProtocolError>;
}
