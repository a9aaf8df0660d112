//! Provider discovery metadata

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

const DISCOVERY_PATH: &str = ".well-known/openid-configuration";

/// Subset of the `OpenID` provider configuration used by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMetadata {
    /// Issuer identifier.
    pub issuer: String,
    /// Authorization endpoint the user agent is redirected to.
    pub authorization_endpoint: String,
    /// Dynamic client registration endpoint.
    #[serde(default)]
    pub registration_endpoint: Option<String>,
    /// RP-initiated logout endpoint.
    #[serde(default)]
    pub end_session_endpoint: Option<String>,
}

/// Returns the discovery document URL for an identity provider.
///
/// # Errors
/// Returns `DomainError::InvalidUrl` if `idp` is not an absolute URL.
pub fn discovery_url(idp: &str) -> DomainResult<Url> {
    let base = idp.trim_end_matches('/');
    Url::parse(&format!("{base}/{DISCOVERY_PATH}"))
        .map_err(|e| DomainError::InvalidUrl(format!("{e}: {idp}")))
}
