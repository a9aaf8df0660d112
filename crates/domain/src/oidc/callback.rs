//! Parameters returned by a provider to the redirect URI

use url::Url;

use crate::error::{DomainError, DomainResult};

/// Outcome of an authorization request, as delivered to the redirect URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    /// The provider issued tokens.
    Success {
        /// Echoed request state.
        state: Option<String>,
        /// Identity token (JWT).
        id_token: String,
        /// Access token.
        access_token: String,
    },
    /// The provider refused the request.
    Error {
        /// Echoed request state.
        state: Option<String>,
        /// OAuth error code.
        error: String,
        /// Human readable description.
        description: Option<String>,
    },
}

#[derive(Default)]
struct RawParams {
    state: Option<String>,
    id_token: Option<String>,
    access_token: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

impl RawParams {
    fn parse(encoded: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in url::form_urlencoded::parse(encoded.as_bytes()) {
            let value = Some(value.into_owned());
            match key.as_ref() {
                "state" => params.state = value,
                "id_token" => params.id_token = value,
                "access_token" => params.access_token = value,
                "error" => params.error = value,
                "error_description" => params.error_description = value,
                _ => {}
            }
        }
        params
    }

    const fn is_callback(&self) -> bool {
        self.error.is_some() || self.id_token.is_some() || self.access_token.is_some()
    }
}

impl Callback {
    /// Extracts callback parameters from a URL, looking at the fragment
    /// first (implicit flow) and then the query.
    ///
    /// Returns `Ok(None)` when the URL carries no callback at all.
    ///
    /// # Errors
    /// Returns `DomainError::InvalidCallback` when tokens are only partially
    /// present.
    pub fn from_url(url: &Url) -> DomainResult<Option<Self>> {
        let params = [url.fragment(), url.query()]
            .into_iter()
            .flatten()
            .map(RawParams::parse)
            .find(RawParams::is_callback);

        let Some(params) = params else {
            return Ok(None);
        };

        if let Some(error) = params.error {
            return Ok(Some(Self::Error {
                state: params.state,
                error,
                description: params.error_description,
            }));
        }

        match (params.id_token, params.access_token) {
            (Some(id_token), Some(access_token)) => Ok(Some(Self::Success {
                state: params.state,
                id_token,
                access_token,
            })),
            (None, _) => Err(DomainError::InvalidCallback("missing id_token".to_string())),
            (_, None) => Err(DomainError::InvalidCallback(
                "missing access_token".to_string(),
            )),
        }
    }

    /// Returns the echoed state, if any.
    #[must_use]
    pub fn state(&self) -> Option<&str> {
        match self {
            Self::Success { state, .. } | Self::Error { state, .. } => state.as_deref(),
        }
    }
}
