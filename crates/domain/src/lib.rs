//! Solid Auth Domain - Core identity types
//!
//! This crate defines the domain model of the identity-session broker:
//! sessions, the WebID-OIDC protocol records, client certificates,
//! fetch values and client settings. All types here are pure Rust with
//! no I/O dependencies.

pub mod error;
pub mod http;
pub mod oidc;
pub mod session;
pub mod settings;
pub mod tls;

pub use error::{DomainError, DomainResult};
pub use http::{FetchRequest, FetchResponse, HttpMethod};
pub use oidc::{
    Audience, AuthorizationRequest, Callback, IdTokenClaims, ProviderMetadata, RegisteredClient,
    RegistrationRequest, discovery_url,
};
pub use session::{AuthType, Session};
pub use settings::ClientSettings;
pub use tls::{ClientCertificate, PemSource};
