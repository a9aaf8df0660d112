//! Protocol adapter tests against mock HTTP servers.
//!
//! Covers:
//! - WebID-TLS `HEAD` handshake
//! - WebID-OIDC discovery, registration, login redirect and callback
//! - Provider-side logout
//! - Credential injection by the request authenticator

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use parking_lot::Mutex;
use serde_json::json;
use solid_auth_application::auth::{
    MemoryStorage, ResolvedLoginOptions, ResolvedStorageOptions, save_session,
};
use solid_auth_application::ports::{
    CertificateHandshake, DelegatedHandshake, Fetch, Location, Navigator, ProtocolError,
    RequestAuthenticator, StorageAdapter,
};
use solid_auth_domain::{AuthType, AuthorizationRequest, FetchRequest, Session};
use solid_auth_infrastructure::auth::{client_key, request_key};
use solid_auth_infrastructure::{
    OidcClientConfig, ReqwestAuthenticator, ReqwestFetch, SystemClock, WebIdOidcClient,
    WebIdTlsClient, build_client,
};
use url::Url;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const REDIRECT_URI: &str = "https://app.example/callback";
const ALICE: &str = "https://alice.example/profile#me";

/// Navigator recording every URL it is asked to open.
#[derive(Clone, Default)]
struct RecordingNavigator {
    visited: Arc<Mutex<Vec<Url>>>,
}

impl RecordingNavigator {
    fn last(&self) -> Url {
        self.visited.lock().last().cloned().expect("no navigation")
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, url: &Url) -> Result<(), ProtocolError> {
        self.visited.lock().push(url.clone());
        Ok(())
    }
}

/// Location the test moves by hand.
#[derive(Clone, Default)]
struct SharedLocation {
    url: Arc<Mutex<Option<Url>>>,
}

impl SharedLocation {
    fn go_to(&self, url: &str) {
        *self.url.lock() = Some(Url::parse(url).unwrap());
    }
}

impl Location for SharedLocation {
    fn current_url(&self) -> Option<Url> {
        self.url.lock().clone()
    }
}

struct Harness {
    server: MockServer,
    client: WebIdOidcClient,
    navigator: RecordingNavigator,
    location: SharedLocation,
    storage: MemoryStorage,
}

impl Harness {
    async fn start(client_id: Option<&str>) -> Self {
        let server = MockServer::start().await;
        let navigator = RecordingNavigator::default();
        let location = SharedLocation::default();
        let client = WebIdOidcClient::new(
            build_client(Duration::from_secs(5), None).unwrap(),
            OidcClientConfig {
                client_id: client_id.map(str::to_string),
                client_name: "solid-auth-tests".to_string(),
                scope: "openid".to_string(),
            },
            Arc::new(navigator.clone()),
            Arc::new(location.clone()),
            Arc::new(SystemClock::new()),
        );
        Self {
            server,
            client,
            navigator,
            location,
            storage: MemoryStorage::new(),
        }
    }

    fn idp(&self) -> String {
        self.server.uri()
    }

    async fn mount_discovery(&self) {
        let uri = self.server.uri();
        Mock::given(method("GET"))
            .and(path("/.well-known/openid-configuration"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "issuer": uri,
                "authorization_endpoint": format!("{uri}/authorize"),
                "registration_endpoint": format!("{uri}/register"),
                "end_session_endpoint": format!("{uri}/logout"),
                "jwks_uri": format!("{uri}/jwks"),
            })))
            .mount(&self.server)
            .await;
    }

    fn login_options(&self, redirect_uri: Option<&str>) -> ResolvedLoginOptions {
        ResolvedLoginOptions {
            redirect_uri: redirect_uri.map(str::to_string),
            storage: Arc::new(self.storage.clone()),
        }
    }

    fn storage_options(&self) -> ResolvedStorageOptions {
        ResolvedStorageOptions {
            storage: Arc::new(self.storage.clone()),
        }
    }

    fn pending_request(&self) -> AuthorizationRequest {
        let raw = self.storage.get(&request_key(&self.idp())).unwrap().unwrap();
        serde_json::from_str(&raw).unwrap()
    }
}

fn id_token(client_id: &str, nonce: &str, exp_offset_secs: i64) -> String {
    let claims = json!({
        "iss": "https://idp.example",
        "sub": ALICE,
        "aud": client_id,
        "exp": chrono::Utc::now().timestamp() + exp_offset_secs,
        "nonce": nonce,
    });
    format!(
        "eyJhbGciOiJSUzI1NiJ9.{}.c2ln",
        URL_SAFE_NO_PAD.encode(claims.to_string())
    )
}

fn query(url: &Url) -> HashMap<String, String> {
    url.query_pairs().into_owned().collect()
}

// ============================================================================
// WebID-TLS
// ============================================================================

#[tokio::test]
async fn test_tls_user_header_yields_session() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).insert_header("User", ALICE))
        .expect(1)
        .mount(&server)
        .await;

    let idp = format!("{}/", server.uri());
    let client = WebIdTlsClient::new(build_client(Duration::from_secs(5), None).unwrap());

    let session = client.login(&idp).await.unwrap();

    assert_eq!(session, Some(Session::webid_tls(idp, ALICE)));
}

#[tokio::test]
async fn test_tls_without_user_header_yields_none() {
    let server = MockServer::start().await;
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = WebIdTlsClient::new(build_client(Duration::from_secs(5), None).unwrap());

    assert_eq!(client.login(&server.uri()).await.unwrap(), None);
}

#[tokio::test]
async fn test_tls_unreachable_provider_yields_none() {
    let client = WebIdTlsClient::new(build_client(Duration::from_secs(2), None).unwrap());

    assert_eq!(client.login("http://127.0.0.1:9/").await.unwrap(), None);
}

// ============================================================================
// WebID-OIDC login
// ============================================================================

#[tokio::test]
async fn test_login_registers_and_redirects() {
    let harness = Harness::start(None).await;
    harness.mount_discovery().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .and(body_partial_json(json!({
            "redirect_uris": [REDIRECT_URI],
            "client_name": "solid-auth-tests",
            "response_types": ["id_token token"],
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "client_id": "registered-1",
            "redirect_uris": [REDIRECT_URI],
        })))
        .expect(1)
        .mount(&harness.server)
        .await;

    let options = harness.login_options(Some(REDIRECT_URI));
    let response = harness.client.login(&harness.idp(), &options).await.unwrap();
    harness.client.login(&harness.idp(), &options).await.unwrap();

    assert!(response.session.is_none());

    let url = harness.navigator.last();
    assert_eq!(url.path(), "/authorize");
    let params = query(&url);
    let pending = harness.pending_request();
    assert_eq!(params["response_type"], "id_token token");
    assert_eq!(params["client_id"], "registered-1");
    assert_eq!(params["redirect_uri"], REDIRECT_URI);
    assert_eq!(params["scope"], "openid");
    assert_eq!(params["state"], pending.state);
    assert_eq!(params["nonce"], pending.nonce);
    assert!(harness.storage.get(&client_key(&harness.idp())).unwrap().is_some());
}

#[tokio::test]
async fn test_login_with_configured_client_skips_registration() {
    let harness = Harness::start(Some("preconfigured")).await;
    harness.mount_discovery().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&harness.server)
        .await;

    harness
        .client
        .login(&harness.idp(), &harness.login_options(Some(REDIRECT_URI)))
        .await
        .unwrap();

    assert_eq!(query(&harness.navigator.last())["client_id"], "preconfigured");
}

#[tokio::test]
async fn test_login_without_redirect_uri() {
    let harness = Harness::start(Some("preconfigured")).await;

    let result = harness
        .client
        .login(&harness.idp(), &harness.login_options(None))
        .await;

    assert!(matches!(result, Err(ProtocolError::MissingRedirectUri)));
    assert!(harness.navigator.visited.lock().is_empty());
}

#[tokio::test]
async fn test_login_discovery_failure() {
    let harness = Harness::start(None).await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&harness.server)
        .await;

    let result = harness
        .client
        .login(&harness.idp(), &harness.login_options(Some(REDIRECT_URI)))
        .await;

    assert!(matches!(result, Err(ProtocolError::Discovery { .. })));
}

#[tokio::test]
async fn test_login_registration_error() {
    let harness = Harness::start(None).await;
    harness.mount_discovery().await;
    Mock::given(method("POST"))
        .and(path("/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_redirect_uri",
            "error_description": "redirect URI not allowed",
        })))
        .mount(&harness.server)
        .await;

    let result = harness
        .client
        .login(&harness.idp(), &harness.login_options(Some(REDIRECT_URI)))
        .await;

    match result {
        Err(ProtocolError::Registration(message)) => {
            assert_eq!(message, "redirect URI not allowed");
        }
        other => panic!("expected registration error, got {other:?}"),
    }
}

// ============================================================================
// WebID-OIDC callback
// ============================================================================

#[tokio::test]
async fn test_login_then_callback_yields_session() {
    let harness = Harness::start(Some("app-1")).await;
    harness.mount_discovery().await;

    harness
        .client
        .login(&harness.idp(), &harness.login_options(Some(REDIRECT_URI)))
        .await
        .unwrap();
    let pending = harness.pending_request();
    let token = id_token("app-1", &pending.nonce, 3600);
    harness.location.go_to(&format!(
        "{REDIRECT_URI}#access_token=at-1&token_type=Bearer&id_token={token}&state={}",
        pending.state
    ));

    let session = harness
        .client
        .current_user(&harness.idp(), &harness.storage_options())
        .await
        .unwrap()
        .expect("callback should complete the login");

    assert_eq!(session.auth_type, AuthType::WebIdOidc);
    assert_eq!(session.web_id, ALICE);
    assert_eq!(session.id_token.as_deref(), Some(token.as_str()));
    assert_eq!(session.access_token.as_deref(), Some("at-1"));
    assert!(harness.storage.get(&request_key(&harness.idp())).unwrap().is_none());
}

#[tokio::test]
async fn test_expired_id_token_is_rejected() {
    let harness = Harness::start(Some("app-1")).await;
    harness.mount_discovery().await;

    harness
        .client
        .login(&harness.idp(), &harness.login_options(Some(REDIRECT_URI)))
        .await
        .unwrap();
    let pending = harness.pending_request();
    let token = id_token("app-1", &pending.nonce, -60);
    harness.location.go_to(&format!(
        "{REDIRECT_URI}#access_token=at-1&id_token={token}&state={}",
        pending.state
    ));

    let result = harness
        .client
        .current_user(&harness.idp(), &harness.storage_options())
        .await;

    assert!(matches!(result, Err(ProtocolError::InvalidIdToken(_))));
}

// ============================================================================
// WebID-OIDC logout
// ============================================================================

#[tokio::test]
async fn test_logout_calls_end_session_with_hint() {
    let harness = Harness::start(None).await;
    harness.mount_discovery().await;
    Mock::given(method("GET"))
        .and(path("/logout"))
        .and(query_param("id_token_hint", "id-token-1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&harness.server)
        .await;
    save_session(
        &harness.storage,
        Session::webid_oidc(harness.idp(), ALICE, "id-token-1", "at-1"),
    )
    .unwrap();

    harness
        .client
        .logout(&harness.idp(), &harness.storage_options())
        .await
        .unwrap();
}

#[tokio::test]
async fn test_logout_provider_failure() {
    let harness = Harness::start(None).await;
    harness.mount_discovery().await;
    Mock::given(method("GET"))
        .and(path("/logout"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&harness.server)
        .await;

    let result = harness
        .client
        .logout(&harness.idp(), &harness.storage_options())
        .await;

    assert!(matches!(result, Err(ProtocolError::Provider { .. })));
}

// ============================================================================
// Request authenticator
// ============================================================================

#[tokio::test]
async fn test_oidc_fetch_sends_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/private"))
        .and(header("authorization", "Bearer at-1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("secret"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/private"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let plain = build_client(Duration::from_secs(5), None).unwrap();
    let authenticator = ReqwestAuthenticator::new(plain, None);
    let session = Session::webid_oidc("https://idp.example", ALICE, "id", "at-1");
    let url = format!("{}/private", server.uri());

    let authed = authenticator
        .authenticated_fetch(Some(&session))
        .fetch(FetchRequest::get(&url))
        .await
        .unwrap();
    let anonymous = authenticator
        .authenticated_fetch(None)
        .fetch(FetchRequest::get(&url))
        .await
        .unwrap();
    let overridden = authenticator
        .authenticated_fetch(Some(&session))
        .fetch(FetchRequest::get(&url).with_header("Authorization", "Bearer other"))
        .await
        .unwrap();

    assert_eq!(authed.status, 200);
    assert_eq!(authed.text(), "secret");
    assert_eq!(anonymous.status, 401);
    assert_eq!(overridden.status, 401);
}

#[tokio::test]
async fn test_non_utf8_response_header_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).insert_header(
            "x-title",
            reqwest::header::HeaderValue::from_bytes(b"caf\xe9").unwrap(),
        ))
        .mount(&server)
        .await;

    let response = ReqwestFetch::new(build_client(Duration::from_secs(5), None).unwrap())
        .fetch(FetchRequest::get(server.uri()))
        .await
        .unwrap();

    assert_eq!(
        response.headers.get("x-title").map(String::as_str),
        Some("caf\u{fffd}")
    );
}
