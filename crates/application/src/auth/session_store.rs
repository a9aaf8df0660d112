//! Session store
//!
//! Maps a [`Session`] to a single storage entry per identity provider:
//! `solid-auth-client:session:<idp>` holding the session as JSON.

use solid_auth_domain::Session;

use crate::ports::{StorageAdapter, StorageError};

/// Prefix of the storage key holding a provider's session.
pub const SESSION_KEY_PREFIX: &str = "solid-auth-client:session:";

/// Returns the storage key for a provider's session.
#[must_use]
pub fn session_key(idp: &str) -> String {
    format!("{SESSION_KEY_PREFIX}{idp}")
}

/// Reads the stored session for `idp`.
///
/// An entry that no longer decodes as a session is reported as absent so
/// that a later logout can still clear it.
///
/// # Errors
/// Returns an error if the storage adapter fails.
pub fn get_session(storage: &dyn StorageAdapter, idp: &str) -> Result<Option<Session>, StorageError> {
    let Some(raw) = storage.get(&session_key(idp))? else {
        return Ok(None);
    };

    match serde_json::from_str(&raw) {
        Ok(session) => Ok(Some(session)),
        Err(e) => {
            tracing::warn!(idp, error = %e, "ignoring unreadable stored session");
            Ok(None)
        }
    }
}

/// Persists `session` under its provider and returns it unchanged.
///
/// # Errors
/// Returns an error if the session cannot be encoded or written.
pub fn save_session(storage: &dyn StorageAdapter, session: Session) -> Result<Session, StorageError> {
    let raw =
        serde_json::to_string(&session).map_err(|e| StorageError::Serialization(e.to_string()))?;
    storage.set(&session_key(&session.idp), &raw)?;
    Ok(session)
}

/// Removes any stored session for `idp`.
///
/// # Errors
/// Returns an error if the storage adapter fails.
pub fn clear_session(storage: &dyn StorageAdapter, idp: &str) -> Result<(), StorageError> {
    storage.remove(&session_key(idp))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::auth::MemoryStorage;
    use pretty_assertions::assert_eq;

    const IDP: &str = "https://idp.example";

    #[test]
    fn test_missing_session_is_none() {
        let storage = MemoryStorage::new();
        assert_eq!(get_session(&storage, IDP).unwrap(), None);
    }

    #[test]
    fn test_save_then_get() {
        let storage = MemoryStorage::new();
        let session = Session::webid_oidc(IDP, "https://alice.example/profile#me", "id", "access");

        let saved = save_session(&storage, session.clone()).unwrap();

        assert_eq!(saved, session);
        assert_eq!(get_session(&storage, IDP).unwrap(), Some(session));
        assert_eq!(storage.keys(), vec![session_key(IDP)]);
    }

    #[test]
    fn test_sessions_are_per_provider() {
        let storage = MemoryStorage::new();
        save_session(&storage, Session::webid_tls(IDP, "https://alice.example/#me")).unwrap();

        assert_eq!(get_session(&storage, "https://other-idp.example").unwrap(), None);
    }

    #[test]
    fn test_clear_session() {
        let storage = MemoryStorage::new();
        save_session(&storage, Session::webid_tls(IDP, "https://alice.example/#me")).unwrap();

        clear_session(&storage, IDP).unwrap();

        assert_eq!(get_session(&storage, IDP).unwrap(), None);
        assert!(storage.is_empty());
    }

    #[test]
    fn test_unreadable_entry_is_treated_as_absent() {
        let storage = MemoryStorage::new();
        storage.set(&session_key(IDP), "{not json").unwrap();

        assert_eq!(get_session(&storage, IDP).unwrap(), None);
    }
}
