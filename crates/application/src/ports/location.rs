//! Current location port

use url::Url;

/// Source of the "current page" URL.
///
/// The current URL is the default redirect target for a login and the place
/// where a provider's callback parameters arrive.
pub trait Location: Send + Sync {
    /// Returns the current URL, if the environment has one.
    fn current_url(&self) -> Option<Url>;
}
