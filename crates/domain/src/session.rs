//! Authenticated session types
//!
//! A [`Session`] is the local record of an identity that was successfully
//! authenticated against an identity provider. Sessions are produced only by
//! the identity protocols (WebID-TLS or WebID-OIDC) and are persisted as
//! camelCase JSON.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Authentication method that produced a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthType {
    /// Client-certificate handshake.
    #[serde(rename = "WebID-TLS")]
    WebIdTls,
    /// Redirect-based delegated authorization.
    #[serde(rename = "WebID-OIDC")]
    WebIdOidc,
}

impl AuthType {
    /// Returns the wire name of the authentication method.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WebIdTls => "WebID-TLS",
            Self::WebIdOidc => "WebID-OIDC",
        }
    }
}

impl fmt::Display for AuthType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A successfully authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Method used to authenticate.
    pub auth_type: AuthType,
    /// Identity provider that issued the session.
    pub idp: String,
    /// The authenticated `WebID`.
    pub web_id: String,
    /// OIDC identity token, when produced by the delegated handshake.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,
    /// OIDC access token, when produced by the delegated handshake.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl Session {
    /// Creates a session established through a client-certificate handshake.
    #[must_use]
    pub fn webid_tls(idp: impl Into<String>, web_id: impl Into<String>) -> Self {
        Self {
            auth_type: AuthType::WebIdTls,
            idp: idp.into(),
            web_id: web_id.into(),
            id_token: None,
            access_token: None,
        }
    }

    /// Creates a session established through the delegated-authorization handshake.
    #[must_use]
    pub fn webid_oidc(
        idp: impl Into<String>,
        web_id: impl Into<String>,
        id_token: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            auth_type: AuthType::WebIdOidc,
            idp: idp.into(),
            web_id: web_id.into(),
            id_token: Some(id_token.into()),
            access_token: Some(access_token.into()),
        }
    }

    /// Returns true if the session carries both an identity token and an
    /// access token, which is what a provider-side logout needs.
    #[must_use]
    pub const fn has_token_pair(&self) -> bool {
        self.id_token.is_some() && self.access_token.is_some()
    }

    /// Returns the `Authorization` header value for this session, if any.
    ///
    /// Certificate sessions authenticate at the transport layer and carry no
    /// header.
    #[must_use]
    pub fn authorization_header(&self) -> Option<String> {
        match self.auth_type {
            AuthType::WebIdTls => None,
            AuthType::WebIdOidc => self
                .access_token
                .as_deref()
                .map(|token| format!("Bearer {token}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tls_session_has_no_tokens() {
        let session = Session::webid_tls("https://idp.example", "https://alice.example/profile#me");
        assert_eq!(session.auth_type, AuthType::WebIdTls);
        assert!(!session.has_token_pair());
        assert_eq!(session.authorization_header(), None);
    }

    #[test]
    fn test_oidc_session_token_pair() {
        let session = Session::webid_oidc(
            "https://idp.example",
            "https://alice.example/profile#me",
            "id.token.value",
            "access-123",
        );
        assert!(session.has_token_pair());
        assert_eq!(
            session.authorization_header().as_deref(),
            Some("Bearer access-123")
        );
    }

    #[test]
    fn test_single_token_is_not_a_pair() {
        let mut session = Session::webid_oidc("https://idp.example", "https://a.example/#me", "i", "a");
        session.id_token = None;
        assert!(!session.has_token_pair());
    }

    #[test]
    fn test_serializes_camel_case_and_omits_missing_tokens() {
        let session = Session::webid_tls("https://idp.example", "https://alice.example/profile#me");
        let json = serde_json::to_value(&session).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "authType": "WebID-TLS",
                "idp": "https://idp.example",
                "webId": "https://alice.example/profile#me"
            })
        );
    }

    #[test]
    fn test_deserializes_oidc_session() {
        let json = r#"{
            "authType": "WebID-OIDC",
            "idp": "https://idp.example",
            "webId": "https://alice.example/profile#me",
            "idToken": "id",
            "accessToken": "access"
        }"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.auth_type, AuthType::WebIdOidc);
        assert_eq!(session.access_token.as_deref(), Some("access"));
    }
}
