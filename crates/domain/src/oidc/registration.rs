//! Dynamic client registration records

use serde::{Deserialize, Serialize};

/// Body of a dynamic client registration request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistrationRequest {
    /// Redirect URIs the client will use.
    pub redirect_uris: Vec<String>,
    /// Human readable client name.
    pub client_name: String,
    /// OAuth response types.
    pub response_types: Vec<String>,
    /// OAuth grant types.
    pub grant_types: Vec<String>,
}

impl RegistrationRequest {
    /// Registration for an implicit-flow client with one redirect URI.
    #[must_use]
    pub fn implicit(redirect_uri: impl Into<String>, client_name: impl Into<String>) -> Self {
        Self {
            redirect_uris: vec![redirect_uri.into()],
            client_name: client_name.into(),
            response_types: vec!["id_token token".to_string()],
            grant_types: vec!["implicit".to_string()],
        }
    }
}

/// Client credentials issued by a provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredClient {
    /// Client identifier.
    pub client_id: String,
    /// Redirect URIs accepted for this client.
    #[serde(default)]
    pub redirect_uris: Vec<String>,
}

impl RegisteredClient {
    /// Returns true if the registration covers this redirect URI.
    ///
    /// A registration that lists no redirect URIs is accepted for any.
    #[must_use]
    pub fn allows_redirect(&self, redirect_uri: &str) -> bool {
        self.redirect_uris.is_empty() || self.redirect_uris.iter().any(|uri| uri == redirect_uri)
    }
}
