//! Pending authorization request

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// An authorization request waiting for the provider's callback.
///
/// Stored between the redirect and the return to the redirect URI so the
/// callback can be matched by `state` and the identity token by `nonce`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorizationRequest {
    /// Identity provider the request was sent to.
    pub idp: String,
    /// Client id used for the request.
    pub client_id: String,
    /// Where the provider returns control.
    pub redirect_uri: String,
    /// Opaque value echoed back by the provider.
    pub state: String,
    /// Value the identity token must carry.
    pub nonce: String,
}

impl AuthorizationRequest {
    /// Response type requested from the provider (implicit flow).
    pub const RESPONSE_TYPE: &'static str = "id_token token";

    /// Builds the URL the user agent is sent to.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidUrl` if the endpoint is not an absolute URL.
    pub fn authorization_url(&self, endpoint: &str, scope: &str) -> DomainResult<Url> {
        let mut url =
            Url::parse(endpoint).map_err(|e| DomainError::InvalidUrl(format!("{e}: {endpoint}")))?;
        url.query_pairs_mut()
            .append_pair("response_type", Self::RESPONSE_TYPE)
            .append_pair("client_id", &self.client_id)
            .append_pair("redirect_uri", &self.redirect_uri)
            .append_pair("scope", scope)
            .append_pair("state", &self.state)
            .append_pair("nonce", &self.nonce);
        Ok(url)
    }
}
