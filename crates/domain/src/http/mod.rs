//! HTTP values exchanged through the authenticated fetch capability.

mod message;
mod method;

pub use message::{FetchRequest, FetchResponse};
pub use method::HttpMethod;
