//! Client settings
//!
//! Configuration for the broker's adapters: OIDC client identity, the
//! redirect target, durable storage location and the optional client
//! certificate.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::tls::ClientCertificate;

/// Settings for the identity-session client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Pre-registered OIDC client id. When absent the client registers
    /// dynamically with each provider.
    #[serde(default)]
    pub client_id: Option<String>,

    /// Client name sent during dynamic registration.
    #[serde(default = "default_client_name")]
    pub client_name: String,

    /// OIDC scope requested during login.
    #[serde(default = "default_scope")]
    pub scope: String,

    /// Redirect URI used for login when the caller gives none.
    #[serde(default)]
    pub redirect_uri: Option<String>,

    /// URL treated as the current location (the provider's callback target).
    #[serde(default)]
    pub current_url: Option<String>,

    /// Path of the durable storage file.
    #[serde(default)]
    pub storage_path: Option<PathBuf>,

    /// Client certificate for WebID-TLS.
    #[serde(default)]
    pub client_certificate: Option<ClientCertificate>,

    /// Timeout for every outgoing HTTP request, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_client_name() -> String {
    "solid-auth".to_string()
}

fn default_scope() -> String {
    "openid".to_string()
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            client_id: None,
            client_name: default_client_name(),
            scope: default_scope(),
            redirect_uri: None,
            current_url: None,
            storage_path: None,
            client_certificate: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_settings() {
        let settings = ClientSettings::default();
        assert_eq!(settings.client_name, "solid-auth");
        assert_eq!(settings.scope, "openid");
        assert_eq!(settings.request_timeout_secs, 30);
        assert!(settings.client_certificate.is_none());
    }

    #[test]
    fn partial_json_takes_defaults() {
        let settings: ClientSettings =
            serde_json::from_str(r#"{"client_id": "app-1", "scope": "openid webid"}"#).unwrap();
        assert_eq!(settings.client_id.as_deref(), Some("app-1"));
        assert_eq!(settings.scope, "openid webid");
        assert_eq!(settings.client_name, "solid-auth");
        assert_eq!(settings.request_timeout_secs, 30);
    }
}
