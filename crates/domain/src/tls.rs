//! Client certificate description for the WebID-TLS handshake.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where PEM material for a certificate or key comes from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PemSource {
    /// Load from a PEM file.
    File {
        /// Path to the PEM file.
        path: PathBuf,
    },
    /// Inline PEM content.
    Inline {
        /// PEM-encoded content.
        content: String,
    },
}

/// Client certificate presented to the identity provider.
///
/// The certificate's subject alternative name is expected to carry the
/// user's `WebID`; the provider answers with that `WebID` when the handshake
/// succeeds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClientCertificate {
    /// Certificate chain source.
    pub certificate: PemSource,
    /// Private key source.
    pub private_key: PemSource,
}

impl ClientCertificate {
    /// Create from PEM files.
    #[must_use]
    pub fn from_pem_files(cert_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        Self {
            certificate: PemSource::File {
                path: cert_path.into(),
            },
            private_key: PemSource::File {
                path: key_path.into(),
            },
        }
    }

    /// Create from inline PEM strings.
    #[must_use]
    pub fn from_pem(certificate: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            certificate: PemSource::Inline {
                content: certificate.into(),
            },
            private_key: PemSource::Inline {
                content: private_key.into(),
            },
        }
    }
}
