//! Persisted client state: tokens, the signed-in user, and the wizard draft.
//!
//! Values live in a flat string key/value store. [`FileStorage`] keeps them
//! in one JSON object under the state directory; [`MemoryStorage`] is used by
//! tests and one-shot commands.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use choosee_core::auth::{TokenPair, User};
use choosee_core::PreferenceDraft;

use crate::error::ClientError;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";
pub const USER_KEY: &str = "user";
pub const WIZARD_PREFERENCES_KEY: &str = "wizardPreferences";

const STATE_FILE: &str = "state.json";

pub trait Storage: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, ClientError>;

    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the backing store cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), ClientError>;

    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] when the backing store cannot be written.
    fn remove(&self, key: &str) -> Result<(), ClientError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, ClientError> {
        self.values
            .lock()
            .map_err(|_| ClientError::Storage("in-memory state lock poisoned".to_string()))
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// A JSON object on disk, rewritten whole on every change.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileStorage {
    /// Opens (without creating) the state file inside `dir`.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            path: dir.join(STATE_FILE),
            guard: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, ClientError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => {
                return Err(ClientError::Storage(format!(
                    "failed to read {}: {e}",
                    self.path.display()
                )))
            }
        };
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(&content).map_err(|e| ClientError::Deserialize {
            context: self.path.display().to_string(),
            source: e,
        })
    }

    fn write_all(&self, values: &BTreeMap<String, String>) -> Result<(), ClientError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ClientError::Storage(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let body = serde_json::to_string_pretty(values).map_err(|e| ClientError::Deserialize {
            context: self.path.display().to_string(),
            source: e,
        })?;
        std::fs::write(&self.path, body).map_err(|e| {
            ClientError::Storage(format!("failed to write {}: {e}", self.path.display()))
        })
    }

    fn update<F>(&self, change: F) -> Result<(), ClientError>
    where
        F: FnOnce(&mut BTreeMap<String, String>),
    {
        let _guard = self
            .guard
            .lock()
            .map_err(|_| ClientError::Storage("state file lock poisoned".to_string()))?;
        let mut values = self.read_all()?;
        change(&mut values);
        self.write_all(&values)
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, ClientError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), ClientError> {
        self.update(|values| {
            values.insert(key.to_string(), value.to_string());
        })
    }

    fn remove(&self, key: &str) -> Result<(), ClientError> {
        self.update(|values| {
            values.remove(key);
        })
    }
}

/// Typed view over a [`Storage`], shared between the client and its caller.
#[derive(Clone)]
pub struct Session {
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session").finish_non_exhaustive()
    }
}

impl Session {
    pub fn new(storage: impl Storage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::default())
    }

    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(FileStorage::in_dir(dir))
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the store cannot be read.
    pub fn access_token(&self) -> Result<Option<String>, ClientError> {
        self.storage.get(ACCESS_TOKEN_KEY)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the store cannot be read.
    pub fn refresh_token(&self) -> Result<Option<String>, ClientError> {
        self.storage.get(REFRESH_TOKEN_KEY)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the store cannot be read.
    pub fn is_authenticated(&self) -> Result<bool, ClientError> {
        Ok(self.access_token()?.is_some_and(|t| !t.is_empty()))
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the store cannot be written.
    pub fn store_tokens(&self, tokens: &TokenPair) -> Result<(), ClientError> {
        self.storage.set(ACCESS_TOKEN_KEY, &tokens.access)?;
        self.storage.set(REFRESH_TOKEN_KEY, &tokens.refresh)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the store cannot be written.
    pub fn store_access_token(&self, access: &str) -> Result<(), ClientError> {
        self.storage.set(ACCESS_TOKEN_KEY, access)
    }

    /// The stored user, or `None` if absent or unreadable.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the store cannot be read.
    pub fn user(&self) -> Result<Option<User>, ClientError> {
        let Some(raw) = self.storage.get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable stored user");
                Ok(None)
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the store cannot be written.
    pub fn store_user(&self, user: &User) -> Result<(), ClientError> {
        let raw = serde_json::to_string(user).map_err(|e| ClientError::Deserialize {
            context: USER_KEY.to_string(),
            source: e,
        })?;
        self.storage.set(USER_KEY, &raw)
    }

    /// Forgets tokens and the stored user. The wizard draft is kept.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the store cannot be written.
    pub fn clear_credentials(&self) -> Result<(), ClientError> {
        self.storage.remove(ACCESS_TOKEN_KEY)?;
        self.storage.remove(REFRESH_TOKEN_KEY)?;
        self.storage.remove(USER_KEY)
    }

    /// The persisted wizard draft. An unreadable draft is treated as absent
    /// so the wizard starts over.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the store cannot be read.
    pub fn load_draft(&self) -> Result<Option<PreferenceDraft>, ClientError> {
        let Some(raw) = self.storage.get(WIZARD_PREFERENCES_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(draft) => Ok(Some(draft)),
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable wizard preferences");
                Ok(None)
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the store cannot be written.
    pub fn save_draft(&self, draft: &PreferenceDraft) -> Result<(), ClientError> {
        let raw = serde_json::to_string(draft).map_err(|e| ClientError::Deserialize {
            context: WIZARD_PREFERENCES_KEY.to_string(),
            source: e,
        })?;
        self.storage.set(WIZARD_PREFERENCES_KEY, &raw)
    }

    /// # Errors
    ///
    /// Returns [`ClientError::Storage`] if the store cannot be written.
    pub fn clear_draft(&self) -> Result<(), ClientError> {
        self.storage.remove(WIZARD_PREFERENCES_KEY)
    }
}

#[cfg(test)]
mod tests {
    use choosee_core::Coords;

    use super::*;

    fn tokens() -> TokenPair {
        TokenPair {
            access: "access-1".to_string(),
            refresh: "refresh-1".to_string(),
        }
    }

    #[test]
    fn clearing_credentials_keeps_the_draft() {
        let session = Session::in_memory();
        let mut draft = PreferenceDraft::default();
        draft.location = Some(Coords::new(10.3, 123.9));
        session.store_tokens(&tokens()).unwrap();
        session.save_draft(&draft).unwrap();

        session.clear_credentials().unwrap();

        assert!(!session.is_authenticated().unwrap());
        assert!(session.refresh_token().unwrap().is_none());
        assert_eq!(session.load_draft().unwrap(), Some(draft));
    }

    #[test]
    fn unreadable_draft_is_treated_as_absent() {
        let storage = MemoryStorage::default();
        storage.set(WIZARD_PREFERENCES_KEY, "{not json").unwrap();
        let session = Session::new(storage);
        assert!(session.load_draft().unwrap().is_none());
    }

    #[test]
    fn file_storage_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let state_dir = dir.path().join("nested");

        let first = Session::in_dir(&state_dir);
        first.store_tokens(&tokens()).unwrap();
        first
            .store_user(&User {
                id: Some(7),
                username: Some("juan".to_string()),
                email: "juan@example.com".to_string(),
            })
            .unwrap();

        let second = Session::in_dir(&state_dir);
        assert_eq!(second.access_token().unwrap().as_deref(), Some("access-1"));
        assert_eq!(second.user().unwrap().map(|u| u.email), Some("juan@example.com".to_string()));

        let raw = std::fs::read_to_string(state_dir.join(STATE_FILE)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[ACCESS_TOKEN_KEY], "access-1");
        assert_eq!(value[REFRESH_TOKEN_KEY], "refresh-1");
    }

    #[test]
    fn missing_state_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::in_dir(dir.path());
        assert!(storage.get(ACCESS_TOKEN_KEY).unwrap().is_none());
        storage.remove(ACCESS_TOKEN_KEY).unwrap();
    }
}
