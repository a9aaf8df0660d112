//! Solid Auth Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus settings loading.

pub mod adapters;
pub mod auth;
pub mod config;
pub mod http;
pub mod storage;

pub use adapters::{ConsoleNavigator, FixedLocation, SystemClock};
pub use auth::{OidcClientConfig, WebIdOidcClient, WebIdTlsClient};
pub use config::{ConfigError, load_settings};
pub use http::{ReqwestAuthenticator, ReqwestFetch, build_client, load_identity};
pub use storage::{FileStorage, default_storage_path};
