//! Session broker
//!
//! Orchestrates login, current-user resolution and logout for an identity
//! provider. The certificate handshake is always tried before the delegated
//! handshake; a certificate session is authoritative.

use std::sync::Arc;

use solid_auth_domain::Session;
use tracing::{debug, info};

use super::options::{BrokerDefaults, CurrentUserOptions, LoginOptions, LogoutOptions};
use super::response::AuthResponse;
use super::session_store::{clear_session, get_session, save_session};
use crate::ApplicationResult;
use crate::ports::{CertificateHandshake, DelegatedHandshake, Fetch, RequestAuthenticator};

/// Sequences the identity protocols and the session store.
///
/// The broker keeps no session state of its own; the storage selected for a
/// call is the only owner of sessions.
pub struct SessionBroker<A, B, R> {
    certificate: A,
    delegated: B,
    authenticator: R,
    defaults: BrokerDefaults,
}

impl<A, B, R> SessionBroker<A, B, R>
where
    A: CertificateHandshake,
    B: DelegatedHandshake,
    R: RequestAuthenticator,
{
    /// Creates a broker from its collaborators.
    pub const fn new(certificate: A, delegated: B, authenticator: R, defaults: BrokerDefaults) -> Self {
        Self {
            certificate,
            delegated,
            authenticator,
            defaults,
        }
    }

    /// Defaults applied to caller options.
    pub const fn defaults(&self) -> &BrokerDefaults {
        &self.defaults
    }

    /// Logs in to `idp`.
    ///
    /// Tries the certificate handshake first and persists its session. If it
    /// yields nothing, the delegated handshake's response is returned as-is;
    /// that handshake persists on its own and may redirect the user agent.
    ///
    /// # Errors
    /// Forwards any protocol or storage error unchanged.
    pub async fn login(&self, idp: &str, options: LoginOptions) -> ApplicationResult<AuthResponse> {
        let options = options.resolve(&self.defaults);

        debug!(idp, "trying certificate handshake");
        if let Some(session) = self.certificate.login(idp).await? {
            let session = save_session(options.storage.as_ref(), session)?;
            info!(idp, web_id = %session.web_id, auth_type = %session.auth_type, "logged in");
            return Ok(self.package(Some(session)));
        }

        debug!(idp, redirect_uri = ?options.redirect_uri, "no certificate session, delegating");
        Ok(self.delegated.login(idp, &options).await?)
    }

    /// Resolves the session that already exists for `idp`, or one that can
    /// be established without an explicit login.
    ///
    /// A stored session is returned without contacting the provider.
    /// Otherwise the certificate handshake is tried, then the delegated
    /// handshake's callback resumption; whatever emerges is persisted. When
    /// nothing does, the response has no session and an unauthenticated
    /// fetch.
    ///
    /// # Errors
    /// Forwards any protocol or storage error unchanged.
    pub async fn current_user(
        &self,
        idp: &str,
        options: CurrentUserOptions,
    ) -> ApplicationResult<AuthResponse> {
        let options = options.resolve(&self.defaults);
        let storage = options.storage.as_ref();

        if let Some(session) = get_session(storage, idp)? {
            debug!(idp, web_id = %session.web_id, "using stored session");
            return Ok(self.package(Some(session)));
        }

        let session = match self.certificate.login(idp).await? {
            Some(session) => Some(session),
            None => {
                debug!(idp, "no certificate session, checking for provider callback");
                self.delegated.current_user(idp, &options).await?
            }
        };

        let session = session
            .map(|session| save_session(storage, session))
            .transpose()?;
        match &session {
            Some(session) => info!(idp, web_id = %session.web_id, "session resolved"),
            None => debug!(idp, "no session"),
        }

        Ok(self.package(session))
    }

    /// Logs out of `idp`.
    ///
    /// A stored session carrying both tokens is first ended at the provider;
    /// then the local entry is cleared. Succeeds when nothing was stored.
    ///
    /// # Errors
    /// Forwards any protocol or storage error unchanged. If the provider-side
    /// logout fails, the local session is left in place.
    pub async fn logout(&self, idp: &str, options: LogoutOptions) -> ApplicationResult<()> {
        let options = options.resolve(&self.defaults);
        let storage = options.storage.as_ref();

        let session = get_session(storage, idp)?;
        if session.as_ref().is_some_and(Session::has_token_pair) {
            debug!(idp, "ending session at provider");
            self.delegated.logout(idp, &options).await?;
        }

        clear_session(storage, idp)?;
        info!(idp, had_session = session.is_some(), "logged out");
        Ok(())
    }

    fn package(&self, session: Option<Session>) -> AuthResponse {
        let fetch: Arc<dyn Fetch> = self.authenticator.authenticated_fetch(session.as_ref());
        AuthResponse::new(session, fetch)
    }
}
