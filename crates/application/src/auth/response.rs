//! Authentication response returned to callers.

use std::fmt;
use std::sync::Arc;

use solid_auth_domain::Session;

use crate::ports::Fetch;

/// A session (possibly absent) paired with a fetch bound to it.
///
/// Built fresh for every call and never persisted.
#[derive(Clone)]
pub struct AuthResponse {
    /// The authenticated session, or `None` if no authentication was
    /// established.
    pub session: Option<Session>,
    /// Fetch that attaches the session's credentials; unauthenticated when
    /// `session` is `None`.
    pub fetch: Arc<dyn Fetch>,
}

impl AuthResponse {
    /// Creates a response.
    #[must_use]
    pub fn new(session: Option<Session>, fetch: Arc<dyn Fetch>) -> Self {
        Self { session, fetch }
    }

    /// Returns true if a session was established.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Returns the authenticated `WebID`, if any.
    #[must_use]
    pub fn web_id(&self) -> Option<&str> {
        self.session.as_ref().map(|session| session.web_id.as_str())
    }
}

impl fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthResponse")
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
