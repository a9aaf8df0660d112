//! Fetch adapter using reqwest.
//!
//! `ReqwestFetch` implements the `Fetch` port; `ReqwestAuthenticator` picks
//! the client and credentials a session calls for.

use std::collections::BTreeMap;
use std::sync::Arc;

use reqwest::{Client, Method, Url};
use solid_auth_application::ports::{Fetch, FetchError, FetchFuture, RequestAuthenticator};
use solid_auth_domain::{AuthType, FetchRequest, FetchResponse, HttpMethod, Session};
use tracing::{debug, warn};

/// Fetch function over a `reqwest::Client`, optionally attaching an
/// `Authorization` header.
pub struct ReqwestFetch {
    client: Client,
    authorization: Option<String>,
}

impl ReqwestFetch {
    /// Creates an unauthenticated fetch.
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self {
            client,
            authorization: None,
        }
    }

    /// Creates a fetch that sends `authorization` unless the request sets
    /// its own `Authorization` header.
    #[must_use]
    pub fn with_authorization(client: Client, authorization: impl Into<String>) -> Self {
        Self {
            client,
            authorization: Some(authorization.into()),
        }
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Maps reqwest errors to `FetchError`.
    pub(crate) fn map_error(error: &reqwest::Error) -> FetchError {
        if error.is_timeout() {
            return FetchError::Timeout;
        }
        if error.is_builder() {
            return FetchError::InvalidUrl(error.to_string());
        }
        FetchError::Network(error.to_string())
    }
}

impl Fetch for ReqwestFetch {
    fn fetch(&self, request: FetchRequest) -> FetchFuture<'_> {
        Box::pin(async move {
            let url = Url::parse(&request.url)
                .map_err(|e| FetchError::InvalidUrl(format!("{e}: {}", request.url)))?;

            let mut builder = self
                .client
                .request(Self::to_reqwest_method(request.method), url);

            if let Some(authorization) = &self.authorization
                && !request.has_header("authorization")
            {
                builder = builder.header(reqwest::header::AUTHORIZATION, authorization);
            }
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(|e| Self::map_error(&e))?;
            let status = response.status().as_u16();
            let headers: BTreeMap<String, String> = response
                .headers()
                .iter()
                .map(|(k, v)| {
                    (
                        k.as_str().to_string(),
                        String::from_utf8_lossy(v.as_bytes()).into_owned(),
                    )
                })
                .collect();
            let body = response
                .bytes()
                .await
                .map_err(|e| FetchError::Body(e.to_string()))?
                .to_vec();

            debug!(method = %request.method, url = %request.url, status, "fetched");
            Ok(FetchResponse {
                status,
                headers,
                body,
            })
        })
    }
}

/// Request authenticator backed by reqwest clients.
///
/// OIDC sessions get a bearer header on the plain client. TLS sessions use
/// the certificate-bearing client, which authenticates at the transport
/// layer.
#[derive(Clone)]
pub struct ReqwestAuthenticator {
    plain: Client,
    certificate: Option<Client>,
}

impl ReqwestAuthenticator {
    /// Creates an authenticator from a plain client and, if a client
    /// certificate is configured, a client presenting it.
    #[must_use]
    pub const fn new(plain: Client, certificate: Option<Client>) -> Self {
        Self { plain, certificate }
    }
}

impl RequestAuthenticator for ReqwestAuthenticator {
    fn authenticated_fetch(&self, session: Option<&Session>) -> Arc<dyn Fetch> {
        let Some(session) = session else {
            return Arc::new(ReqwestFetch::new(self.plain.clone()));
        };

        match session.auth_type {
            AuthType::WebIdOidc => match session.authorization_header() {
                Some(header) => Arc::new(ReqwestFetch::with_authorization(self.plain.clone(), header)),
                None => {
                    warn!(idp = %session.idp, "OIDC session has no access token");
                    Arc::new(ReqwestFetch::new(self.plain.clone()))
                }
            },
            AuthType::WebIdTls => {
                let client = self.certificate.as_ref().unwrap_or_else(|| {
                    warn!(idp = %session.idp, "TLS session but no client certificate configured");
                    &self.plain
                });
                Arc::new(ReqwestFetch::new(client.clone()))
            }
        }
    }
}
