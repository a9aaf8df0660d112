//! Delegated-authorization handshake port (WebID-OIDC)

use async_trait::async_trait;
use solid_auth_domain::Session;

use super::ProtocolError;
use crate::auth::{AuthResponse, ResolvedLoginOptions, ResolvedStorageOptions};

/// Redirect-based authentication through the identity provider.
///
/// Implementations own their persistence: anything they need across the
/// redirect (pending requests, client registrations, the session produced
/// by `login`) is written through the storage in the options.
#[async_trait]
pub trait DelegatedHandshake: Send + Sync {
    /// Starts (or completes) an interactive login.
    ///
    /// # Errors
    /// Returns an error if discovery, registration or navigation fails.
    async fn login(
        &self,
        idp: &str,
        options: &ResolvedLoginOptions,
    ) -> Result<AuthResponse, ProtocolError>;

    /// Resumes a session from provider callback state, if there is one.
    ///
    /// # Errors
    /// Returns an error if callback state is present but invalid.
    async fn current_user(
        &self,
        idp: &str,
        options: &ResolvedStorageOptions,
    ) -> Result<Option<Session>, ProtocolError>;

    /// Ends the session at the provider.
    ///
    /// # Errors
    /// Returns an error if the provider-side logout fails.
    async fn logout(&self, idp: &str, options: &ResolvedStorageOptions)
    -> Result<(), ProtocolError>;
}
