//! Solid Auth Application - Session broker and ports
//!
//! This crate holds the broker that sequences the WebID-TLS and WebID-OIDC
//! handshakes, the session store, and the ports its adapters implement.

pub mod auth;
pub mod error;
pub mod ports;

pub use auth::{
    AuthResponse, BrokerDefaults, CurrentUserOptions, LoginOptions, LogoutOptions, MemoryStorage,
    SessionBroker, StorageOptions,
};
pub use error::{ApplicationError, ApplicationResult};
