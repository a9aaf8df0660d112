//! Identity token claims

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::error::{DomainError, DomainResult};

/// The `aud` claim, which may be a single string or a list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Audience {
    /// One audience.
    Single(String),
    /// Several audiences.
    Multiple(Vec<String>),
}

impl Audience {
    /// Returns true if `client_id` is among the audiences.
    #[must_use]
    pub fn contains(&self, client_id: &str) -> bool {
        match self {
            Self::Single(aud) => aud == client_id,
            Self::Multiple(auds) => auds.iter().any(|aud| aud == client_id),
        }
    }
}

/// Claims carried by a WebID-OIDC identity token.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IdTokenClaims {
    /// Issuer.
    pub iss: String,
    /// Subject.
    pub sub: String,
    /// Audience.
    pub aud: Audience,
    /// Expiry as seconds since the epoch.
    pub exp: i64,
    /// Nonce echoed from the authorization request.
    #[serde(default)]
    pub nonce: Option<String>,
    /// Explicit `WebID` claim.
    #[serde(default)]
    pub webid: Option<String>,
}

impl IdTokenClaims {
    /// Decodes the payload segment of a compact JWT.
    ///
    /// Only the payload is read; the signature is not checked here.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidToken` if the token is not a three-part
    /// JWT or its payload is not valid base64url JSON.
    pub fn decode(token: &str) -> DomainResult<Self> {
        let segments: Vec<&str> = token.split('.').collect();
        let [_, payload, _] = segments.as_slice() else {
            return Err(DomainError::InvalidToken(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        };

        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| DomainError::InvalidToken(format!("payload is not base64url: {e}")))?;

        serde_json::from_slice(&bytes)
            .map_err(|e| DomainError::InvalidToken(format!("payload is not valid claims: {e}")))
    }

    /// The `WebID` asserted by the token: the `webid` claim, else `sub`.
    #[must_use]
    pub fn web_id(&self) -> &str {
        self.webid.as_deref().unwrap_or(&self.sub)
    }

    /// Returns true if the token has expired at `now`.
    #[must_use]
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(claims: &serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        format!("{header}.{payload}.c2ln")
    }

    #[test]
    fn test_decode_prefers_webid_claim() {
        let claims = IdTokenClaims::decode(&token(&serde_json::json!({
            "iss": "https://idp.example",
            "sub": "alice",
            "aud": ["client-1", "other"],
            "exp": 4_000_000_000_i64,
            "nonce": "n0nce",
            "webid": "https://alice.example/profile#me"
        })))
        .unwrap();

        assert_eq!(claims.web_id(), "https://alice.example/profile#me");
        assert!(claims.aud.contains("client-1"));
        assert_eq!(claims.nonce.as_deref(), Some("n0nce"));
    }

    #[test]
    fn test_sub_is_webid_fallback() {
        let claims = IdTokenClaims::decode(&token(&serde_json::json!({
            "iss": "https://idp.example",
            "sub": "https://alice.example/profile#me",
            "aud": "client-1",
            "exp": 10
        })))
        .unwrap();

        assert_eq!(claims.web_id(), "https://alice.example/profile#me");
        assert!(claims.is_expired_at(Utc::now()));
    }

    #[test]
    fn test_decode_rejects_malformed() {
        assert!(IdTokenClaims::decode("not-a-jwt").is_err());
        assert!(IdTokenClaims::decode("a.!!!.c").is_err());
    }
}
