//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the session broker and its external
//! collaborators. Each port is a trait implemented by adapters in the
//! infrastructure layer (or by test doubles).

mod certificate_handshake;
mod clock;
mod delegated_handshake;
mod fetch;
mod location;
mod navigator;
mod protocol_error;
mod storage;

pub use certificate_handshake::CertificateHandshake;
pub use clock::Clock;
pub use delegated_handshake::DelegatedHandshake;
pub use fetch::{Fetch, FetchError, FetchFuture, RequestAuthenticator};
pub use location::Location;
pub use navigator::Navigator;
pub use protocol_error::ProtocolError;
pub use storage::{StorageAdapter, StorageError};
