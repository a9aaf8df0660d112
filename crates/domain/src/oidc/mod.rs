//! WebID-OIDC protocol records
//!
//! Pure data for the delegated-authorization handshake: provider discovery
//! metadata, client registration, the pending authorization request, the
//! parameters a provider sends back to the redirect URI, and the claims of
//! the identity token.

mod callback;
mod claims;
mod metadata;
mod registration;
mod request;

pub use callback::Callback;
pub use claims::{Audience, IdTokenClaims};
pub use metadata::{ProviderMetadata, discovery_url};
pub use registration::{RegisteredClient, RegistrationRequest};
pub use request::AuthorizationRequest;
