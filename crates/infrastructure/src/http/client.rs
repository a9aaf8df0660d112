//! `reqwest` client construction.

use std::fs;
use std::time::Duration;

use reqwest::{Client, Identity};
use solid_auth_application::ports::ProtocolError;
use solid_auth_domain::{ClientCertificate, PemSource};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("solid-auth/", env!("CARGO_PKG_VERSION"));

/// Builds a client with the given timeout, presenting `identity` during the
/// TLS handshake when one is given.
///
/// Default configuration:
/// - Follow redirects: up to 10
/// - TLS verification: enabled
///
/// # Errors
/// Returns an error if the TLS backend rejects the configuration.
pub fn build_client(timeout: Duration, identity: Option<Identity>) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .redirect(reqwest::redirect::Policy::limited(10))
        .timeout(timeout);
    if let Some(identity) = identity {
        builder = builder.identity(identity);
    }
    builder.build()
}

/// Loads a client certificate and its private key as a TLS identity.
///
/// # Errors
/// Returns `ProtocolError::Certificate` if either PEM source cannot be read
/// or the pair is not a valid identity.
pub fn load_identity(certificate: &ClientCertificate) -> Result<Identity, ProtocolError> {
    let mut pem = read_pem(&certificate.certificate)?;
    if !pem.ends_with(b"\n") {
        pem.push(b'\n');
    }
    pem.extend(read_pem(&certificate.private_key)?);

    Identity::from_pem(&pem).map_err(|e| ProtocolError::Certificate(e.to_string()))
}

fn read_pem(source: &PemSource) -> Result<Vec<u8>, ProtocolError> {
    match source {
        PemSource::File { path } => fs::read(path)
            .map_err(|e| ProtocolError::Certificate(format!("{}: {e}", path.display()))),
        PemSource::Inline { content } => Ok(content.clone().into_bytes()),
    }
}
