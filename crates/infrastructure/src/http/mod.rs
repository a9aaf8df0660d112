//! HTTP infrastructure.
//!
//! This module provides:
//! - `reqwest` client construction, with or without a client certificate
//! - The fetch adapter and the request authenticator built on it

mod client;
mod reqwest_fetch;

pub use client::{USER_AGENT, build_client, load_identity};
pub use reqwest_fetch::{ReqwestAuthenticator, ReqwestFetch};
