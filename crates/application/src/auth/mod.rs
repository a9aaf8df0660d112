//! Session acquisition for the identity-session broker.
//!
//! This module provides:
//! - The `SessionBroker`, which sequences the certificate and delegated
//!   handshakes and manages the session lifecycle around them
//! - The session store mapping sessions to storage entries
//! - An in-memory (ephemeral) storage adapter
//! - Option structs resolved against broker defaults

mod broker;
mod memory_storage;
mod options;
mod response;
pub mod session_store;

pub use broker::SessionBroker;
pub use memory_storage::MemoryStorage;
pub use options::{
    BrokerDefaults, CurrentUserOptions, LoginOptions, LogoutOptions, ResolvedLoginOptions,
    ResolvedStorageOptions, StorageOptions,
};
pub use response::AuthResponse;
pub use session_store::{clear_session, get_session, save_session};
