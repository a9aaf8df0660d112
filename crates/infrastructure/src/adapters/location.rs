//! Location adapter

use solid_auth_application::ports::Location;
use url::Url;

/// Location whose current URL is fixed at construction.
///
/// Outside a browser the "current URL" is whatever the user agent was sent
/// to last: typically the redirect URI the provider returned to, pasted in
/// from the command line or configured.
#[derive(Debug, Clone, Default)]
pub struct FixedLocation {
    url: Option<Url>,
}

impl FixedLocation {
    /// Creates a location at `url`.
    #[must_use]
    pub const fn new(url: Option<Url>) -> Self {
        Self { url }
    }
}

impl Location for FixedLocation {
    fn current_url(&self) -> Option<Url> {
        self.url.clone()
    }
}
