//! WebID-TLS certificate handshake.

use async_trait::async_trait;
use reqwest::Client;
use solid_auth_application::ports::{CertificateHandshake, ProtocolError};
use solid_auth_domain::{DomainError, Session};
use tracing::{debug, warn};
use url::Url;

/// Response header in which the provider reports the authenticated `WebID`.
pub const USER_HEADER: &str = "user";

/// Certificate handshake: a `HEAD` request to the provider with the client
/// certificate presented during TLS.
///
/// The provider answers with the `WebID` bound to the certificate in the
/// `User` header. Any failure to complete the exchange means "no session".
#[derive(Debug, Clone, Default)]
pub struct WebIdTlsClient {
    client: Option<Client>,
}

impl WebIdTlsClient {
    /// Creates a handshake that sends requests through `client`, which is
    /// expected to carry the client certificate.
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// Creates a handshake that never yields a session, for setups without
    /// a client certificate.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { client: None }
    }
}

#[async_trait]
impl CertificateHandshake for WebIdTlsClient {
    async fn login(&self, idp: &str) -> Result<Option<Session>, ProtocolError> {
        let url = Url::parse(idp).map_err(|e| DomainError::InvalidUrl(format!("{e}: {idp}")))?;
        let Some(client) = &self.client else {
            debug!(idp, "no client certificate configured");
            return Ok(None);
        };

        let response = match client.head(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(idp, error = %e, "certificate handshake failed");
                return Ok(None);
            }
        };

        let web_id = response
            .headers()
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        Ok(web_id.map(|web_id| {
            debug!(idp, web_id, "certificate accepted");
            Session::webid_tls(idp, web_id)
        }))
    }
}
