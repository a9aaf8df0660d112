//! Broker wiring from settings.

use std::sync::Arc;
use std::time::Duration;

use solid_auth_application::ports::StorageAdapter;
use solid_auth_application::{BrokerDefaults, MemoryStorage, SessionBroker};
use solid_auth_domain::ClientSettings;
use solid_auth_infrastructure::{
    ConsoleNavigator, FileStorage, FixedLocation, OidcClientConfig, ReqwestAuthenticator,
    SystemClock, WebIdOidcClient, WebIdTlsClient, build_client, default_storage_path,
    load_identity,
};
use tracing::debug;
use url::Url;

use crate::error::{CliError, CliResult};

/// Broker over the production adapters.
pub type Broker = SessionBroker<WebIdTlsClient, WebIdOidcClient, ReqwestAuthenticator>;

/// Builds a broker from settings.
///
/// `current_url` overrides the configured current location; `ephemeral`
/// selects in-memory storage.
pub fn build_broker(
    settings: &ClientSettings,
    current_url: Option<&str>,
    ephemeral: bool,
) -> CliResult<Broker> {
    let timeout = Duration::from_secs(settings.request_timeout_secs);
    let plain =
        build_client(timeout, None).map_err(|e| CliError::HttpClient(e.to_string()))?;
    let certificate_client = match &settings.client_certificate {
        Some(certificate) => {
            let identity = load_identity(certificate)?;
            let client = build_client(timeout, Some(identity))
                .map_err(|e| CliError::HttpClient(e.to_string()))?;
            Some(client)
        }
        None => None,
    };

    let location = Arc::new(FixedLocation::new(parse_current_url(
        current_url.or(settings.current_url.as_deref()),
    )?));
    let storage = storage(settings, ephemeral)?;

    let certificate = certificate_client
        .clone()
        .map_or_else(WebIdTlsClient::disabled, WebIdTlsClient::new);
    let delegated = WebIdOidcClient::new(
        plain.clone(),
        OidcClientConfig::from(settings),
        Arc::new(ConsoleNavigator::new()),
        location.clone(),
        Arc::new(SystemClock::new()),
    );
    let authenticator = ReqwestAuthenticator::new(plain, certificate_client);

    Ok(SessionBroker::new(
        certificate,
        delegated,
        authenticator,
        BrokerDefaults::new(storage, location),
    ))
}

fn parse_current_url(url: Option<&str>) -> CliResult<Option<Url>> {
    url.map(|url| {
        Url::parse(url).map_err(|e| CliError::InvalidArgument {
            name: "current URL",
            value: format!("{url} ({e})"),
        })
    })
    .transpose()
}

fn storage(settings: &ClientSettings, ephemeral: bool) -> CliResult<Arc<dyn StorageAdapter>> {
    if ephemeral {
        debug!("using in-memory storage");
        return Ok(Arc::new(MemoryStorage::new()));
    }
    let path = settings
        .storage_path
        .clone()
        .or_else(default_storage_path)
        .ok_or(CliError::NoStoragePath)?;
    debug!(path = %path.display(), "using file storage");
    Ok(Arc::new(FileStorage::new(path)))
}
