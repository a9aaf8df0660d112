//! Caller options and their resolution against broker defaults.
//!
//! Each broker operation resolves its options exactly once, at entry: any
//! field the caller set wins, every other field takes the default.

use std::fmt;
use std::sync::Arc;

use crate::ports::{Location, StorageAdapter};

/// Defaults for options the caller leaves unset.
#[derive(Clone)]
pub struct BrokerDefaults {
    storage: Arc<dyn StorageAdapter>,
    location: Arc<dyn Location>,
}

impl BrokerDefaults {
    /// Creates defaults from the durable storage adapter and the current
    /// location.
    #[must_use]
    pub fn new(storage: Arc<dyn StorageAdapter>, location: Arc<dyn Location>) -> Self {
        Self { storage, location }
    }

    /// The default storage adapter.
    #[must_use]
    pub fn storage(&self) -> Arc<dyn StorageAdapter> {
        Arc::clone(&self.storage)
    }

    /// The default redirect URI: the current URL without its fragment.
    #[must_use]
    pub fn redirect_uri(&self) -> Option<String> {
        self.location.current_url().map(|mut url| {
            url.set_fragment(None);
            url.into()
        })
    }
}

impl fmt::Debug for BrokerDefaults {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BrokerDefaults")
            .field("current_url", &self.location.current_url())
            .finish_non_exhaustive()
    }
}

/// Options for `login`.
#[derive(Clone, Default)]
pub struct LoginOptions {
    /// Where the delegated handshake returns control.
    pub redirect_uri: Option<String>,
    /// Storage for the session.
    pub storage: Option<Arc<dyn StorageAdapter>>,
}

impl LoginOptions {
    /// Options with every field defaulted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the redirect URI.
    #[must_use]
    pub fn with_redirect_uri(mut self, redirect_uri: impl Into<String>) -> Self {
        self.redirect_uri = Some(redirect_uri.into());
        self
    }

    /// Sets the storage adapter.
    #[must_use]
    pub fn with_storage(mut self, storage: Arc<dyn StorageAdapter>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Fills unset fields from `defaults`.
    #[must_use]
    pub fn resolve(self, defaults: &BrokerDefaults) -> ResolvedLoginOptions {
        ResolvedLoginOptions {
            redirect_uri: self.redirect_uri.or_else(|| defaults.redirect_uri()),
            storage: self.storage.unwrap_or_else(|| defaults.storage()),
        }
    }
}

impl fmt::Debug for LoginOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginOptions")
            .field("redirect_uri", &self.redirect_uri)
            .field("storage", &self.storage.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

/// Options that only select storage.
#[derive(Clone, Default)]
pub struct StorageOptions {
    /// Storage for the session.
    pub storage: Option<Arc<dyn StorageAdapter>>,
}

/// Options for `current_user`.
pub type CurrentUserOptions = StorageOptions;

/// Options for `logout`.
pub type LogoutOptions = StorageOptions;

impl StorageOptions {
    /// Options with every field defaulted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the storage adapter.
    #[must_use]
    pub fn with_storage(mut self, storage: Arc<dyn StorageAdapter>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Fills unset fields from `defaults`.
    #[must_use]
    pub fn resolve(self, defaults: &BrokerDefaults) -> ResolvedStorageOptions {
        ResolvedStorageOptions {
            storage: self.storage.unwrap_or_else(|| defaults.storage()),
        }
    }
}

impl fmt::Debug for StorageOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StorageOptions")
            .field("storage", &self.storage.as_ref().map(|_| "<custom>"))
            .finish()
    }
}

/// Login options with every field decided.
#[derive(Clone)]
pub struct ResolvedLoginOptions {
    /// Redirect URI, absent only if neither the caller nor the location
    /// supplied one.
    pub redirect_uri: Option<String>,
    /// Storage adapter in effect.
    pub storage: Arc<dyn StorageAdapter>,
}

/// Storage options with the adapter decided.
#[derive(Clone)]
pub struct ResolvedStorageOptions {
    /// Storage adapter in effect.
    pub storage: Arc<dyn StorageAdapter>,
}
