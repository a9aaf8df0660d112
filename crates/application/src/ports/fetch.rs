//! Authenticated fetch ports

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use solid_auth_domain::{FetchRequest, FetchResponse, Session};

/// Errors returned by a fetch function.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The request URL is invalid.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// The request timed out.
    #[error("request timed out")]
    Timeout,

    /// The request could not be sent or the connection failed.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(String),
}

/// Future returned by [`Fetch::fetch`].
pub type FetchFuture<'a> = Pin<Box<dyn Future<Output = Result<FetchResponse, FetchError>> + Send + 'a>>;

/// A network fetch function, possibly carrying session credentials.
pub trait Fetch: Send + Sync {
    /// Sends a request and returns the response.
    fn fetch(&self, request: FetchRequest) -> FetchFuture<'_>;
}

/// Derives a fetch function from a session.
pub trait RequestAuthenticator: Send + Sync {
    /// Returns a fetch that injects the session's credentials, or an
    /// unauthenticated fetch when `session` is `None`.
    fn authenticated_fetch(&self, session: Option<&Session>) -> Arc<dyn Fetch>;
}
