//! Identity protocol adapters.
//!
//! This module provides:
//! - `WebIdTlsClient`: the certificate handshake (WebID-TLS)
//! - `WebIdOidcClient`: the delegated handshake (WebID-OIDC implicit flow)

mod webid_oidc;
mod webid_tls;

pub use webid_oidc::{
    CLIENT_KEY_PREFIX, OidcClientConfig, REQUEST_KEY_PREFIX, WebIdOidcClient, client_key,
    request_key,
};
pub use webid_tls::{USER_HEADER, WebIdTlsClient};
