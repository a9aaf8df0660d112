//! WebID-OIDC delegated handshake (implicit flow).
//!
//! `login` sends the user agent to the provider's authorization endpoint and
//! stores the pending request; `current_user` completes it from the
//! parameters the provider appended to the redirect URI.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngCore;
use reqwest::Client;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use solid_auth_application::auth::{
    AuthResponse, ResolvedLoginOptions, ResolvedStorageOptions, get_session,
};
use solid_auth_application::ports::{
    Clock, DelegatedHandshake, Location, Navigator, ProtocolError, StorageAdapter, StorageError,
};
use solid_auth_domain::{
    AuthorizationRequest, Callback, ClientSettings, DomainError, IdTokenClaims, ProviderMetadata,
    RegisteredClient, RegistrationRequest, Session, discovery_url,
};
use tracing::{debug, info, warn};
use url::Url;

use crate::http::ReqwestFetch;

/// Prefix of the storage key holding a provider's pending authorization
/// request.
pub const REQUEST_KEY_PREFIX: &str = "solid-auth-client:oidc-request:";

/// Prefix of the storage key holding the client registered with a provider.
pub const CLIENT_KEY_PREFIX: &str = "solid-auth-client:oidc-client:";

/// Returns the storage key for a provider's pending authorization request.
#[must_use]
pub fn request_key(idp: &str) -> String {
    format!("{REQUEST_KEY_PREFIX}{idp}")
}

/// Returns the storage key for the client registered with a provider.
#[must_use]
pub fn client_key(idp: &str) -> String {
    format!("{CLIENT_KEY_PREFIX}{idp}")
}

/// OAuth error body returned by registration endpoints.
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

/// OIDC client identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OidcClientConfig {
    /// Pre-registered client id; when absent the client registers itself.
    pub client_id: Option<String>,
    /// Name sent during dynamic registration.
    pub client_name: String,
    /// Requested scope.
    pub scope: String,
}

impl From<&ClientSettings> for OidcClientConfig {
    fn from(settings: &ClientSettings) -> Self {
        Self {
            client_id: settings.client_id.clone(),
            client_name: settings.client_name.clone(),
            scope: settings.scope.clone(),
        }
    }
}

/// Delegated handshake against a WebID-OIDC provider.
pub struct WebIdOidcClient {
    http: Client,
    config: OidcClientConfig,
    navigator: Arc<dyn Navigator>,
    location: Arc<dyn Location>,
    clock: Arc<dyn Clock>,
}

impl WebIdOidcClient {
    /// Creates a client.
    #[must_use]
    pub fn new(
        http: Client,
        config: OidcClientConfig,
        navigator: Arc<dyn Navigator>,
        location: Arc<dyn Location>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            http,
            config,
            navigator,
            location,
            clock,
        }
    }

    /// Fetches the provider's configuration document.
    ///
    /// # Errors
    /// Returns `ProtocolError::Discovery` if the document cannot be fetched
    /// or parsed.
    pub async fn discover(&self, idp: &str) -> Result<ProviderMetadata, ProtocolError> {
        let url = discovery_url(idp)?;
        let discovery_error = |message: String| ProtocolError::Discovery {
            idp: idp.to_string(),
            message,
        };

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| discovery_error(e.to_string()))?;
        if !response.status().is_success() {
            return Err(discovery_error(format!("status {}", response.status())));
        }

        response
            .json()
            .await
            .map_err(|e| discovery_error(format!("invalid configuration document: {e}")))
    }

    /// Resolves the client id for `idp`: configured, previously registered
    /// for this redirect URI, or freshly registered.
    async fn client_id(
        &self,
        idp: &str,
        metadata: &ProviderMetadata,
        redirect_uri: &str,
        storage: &dyn StorageAdapter,
    ) -> Result<String, ProtocolError> {
        if let Some(client_id) = &self.config.client_id {
            return Ok(client_id.clone());
        }

        let key = client_key(idp);
        if let Some(client) = read_json::<RegisteredClient>(storage, &key)?
            && client.allows_redirect(redirect_uri)
        {
            debug!(idp, client_id = %client.client_id, "reusing registered client");
            return Ok(client.client_id);
        }

        let client = self.register(metadata, redirect_uri).await?;
        write_json(storage, &key, &client)?;
        info!(idp, client_id = %client.client_id, "registered client");
        Ok(client.client_id)
    }

    async fn register(
        &self,
        metadata: &ProviderMetadata,
        redirect_uri: &str,
    ) -> Result<RegisteredClient, ProtocolError> {
        let Some(endpoint) = &metadata.registration_endpoint else {
            return Err(ProtocolError::Registration(
                "provider does not support dynamic registration".to_string(),
            ));
        };

        let body = RegistrationRequest::implicit(redirect_uri, &self.config.client_name);
        let response = self
            .http
            .post(endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProtocolError::Network(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            if let Ok(error) = serde_json::from_str::<ErrorResponse>(&error_text) {
                return Err(ProtocolError::Registration(
                    error.error_description.unwrap_or(error.error),
                ));
            }
            return Err(ProtocolError::Registration(format!(
                "status {status}: {error_text}"
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ProtocolError::Registration(format!("invalid registration response: {e}")))
    }

    /// Checks the identity token against the pending request.
    fn validate(
        &self,
        pending: &AuthorizationRequest,
        id_token: &str,
    ) -> Result<IdTokenClaims, ProtocolError> {
        let claims = IdTokenClaims::decode(id_token)
            .map_err(|e| ProtocolError::InvalidIdToken(e.to_string()))?;

        if claims.nonce.as_deref() != Some(pending.nonce.as_str()) {
            return Err(ProtocolError::InvalidIdToken("nonce mismatch".to_string()));
        }
        if !claims.aud.contains(&pending.client_id) {
            return Err(ProtocolError::InvalidIdToken(format!(
                "audience does not include {}",
                pending.client_id
            )));
        }
        if claims.is_expired_at(self.clock.now()) {
            return Err(ProtocolError::InvalidIdToken("token expired".to_string()));
        }
        Ok(claims)
    }

    fn unauthenticated_fetch(&self) -> Arc<ReqwestFetch> {
        Arc::new(ReqwestFetch::new(self.http.clone()))
    }
}

#[async_trait]
impl DelegatedHandshake for WebIdOidcClient {
    async fn login(
        &self,
        idp: &str,
        options: &ResolvedLoginOptions,
    ) -> Result<AuthResponse, ProtocolError> {
        let redirect_uri = options
            .redirect_uri
            .clone()
            .ok_or(ProtocolError::MissingRedirectUri)?;
        let storage = options.storage.as_ref();

        let metadata = self.discover(idp).await?;
        let client_id = self.client_id(idp, &metadata, &redirect_uri, storage).await?;

        let request = AuthorizationRequest {
            idp: idp.to_string(),
            client_id,
            redirect_uri,
            state: random_token(),
            nonce: random_token(),
        };
        let url = request.authorization_url(&metadata.authorization_endpoint, &self.config.scope)?;
        write_json(storage, &request_key(idp), &request)?;

        debug!(idp, "sending user agent to authorization endpoint");
        self.navigator.navigate(&url)?;

        Ok(AuthResponse::new(None, self.unauthenticated_fetch()))
    }

    async fn current_user(
        &self,
        idp: &str,
        options: &ResolvedStorageOptions,
    ) -> Result<Option<Session>, ProtocolError> {
        let Some(url) = self.location.current_url() else {
            return Ok(None);
        };
        let Some(callback) = Callback::from_url(&url)? else {
            return Ok(None);
        };

        let storage = options.storage.as_ref();
        let key = request_key(idp);
        let Some(pending) = read_json::<AuthorizationRequest>(storage, &key)? else {
            debug!(idp, "callback parameters present but no pending request");
            return Ok(None);
        };
        if callback.state() != Some(pending.state.as_str()) {
            warn!(idp, "callback state does not match pending request");
            return Err(ProtocolError::StateMismatch);
        }

        let (id_token, access_token) = match callback {
            Callback::Error {
                error, description, ..
            } => {
                storage.remove(&key)?;
                return Err(ProtocolError::Provider { error, description });
            }
            Callback::Success {
                id_token,
                access_token,
                ..
            } => (id_token, access_token),
        };

        let claims = self.validate(&pending, &id_token)?;
        storage.remove(&key)?;

        Ok(Some(Session::webid_oidc(
            idp,
            claims.web_id(),
            id_token,
            access_token,
        )))
    }

    async fn logout(
        &self,
        idp: &str,
        options: &ResolvedStorageOptions,
    ) -> Result<(), ProtocolError> {
        let storage = options.storage.as_ref();
        let session = get_session(storage, idp)?;
        let metadata = self.discover(idp).await?;

        if let Some(endpoint) = &metadata.end_session_endpoint {
            let mut url = Url::parse(endpoint)
                .map_err(|e| DomainError::InvalidUrl(format!("{e}: {endpoint}")))?;
            if let Some(id_token) = session.as_ref().and_then(|s| s.id_token.as_deref()) {
                url.query_pairs_mut().append_pair("id_token_hint", id_token);
            }

            let response = self
                .http
                .get(url)
                .send()
                .await
                .map_err(|e| ProtocolError::Network(e.to_string()))?;
            if !response.status().is_success() {
                return Err(ProtocolError::Provider {
                    error: format!("end_session_endpoint returned {}", response.status()),
                    description: None,
                });
            }
        } else {
            debug!(idp, "provider has no end_session_endpoint");
        }

        storage.remove(&request_key(idp))?;
        Ok(())
    }
}

/// 16 random bytes, base64url without padding.
fn random_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

fn read_json<T: DeserializeOwned>(
    storage: &dyn StorageAdapter,
    key: &str,
) -> Result<Option<T>, StorageError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            warn!(key, error = %e, "ignoring unreadable stored entry");
            Ok(None)
        }
    }
}

fn write_json<T: serde::Serialize>(
    storage: &dyn StorageAdapter,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let raw = serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;
    storage.set(key, &raw)
}
