// token_store.rs — Durable persistence for the two credential strings.
//
// The access/refresh pair is the only cross-restart state in the system.
// The pair is stored and cleared as a unit; a store never holds one token
// without the other.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// The persisted credential pair.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredTokens {
    pub access: String,
    pub refresh: String,
}

/// Where the session keeps its credentials between runs.
pub trait TokenStore: Send + Sync {
    /// Read back the persisted pair, if any.
    fn load(&self) -> Result<Option<StoredTokens>, SessionError>;

    /// Persist the pair, replacing whatever was there.
    fn store(&self, tokens: &StoredTokens) -> Result<(), SessionError>;

    /// Remove the persisted pair. Idempotent.
    fn clear(&self) -> Result<(), SessionError>;
}

/// File-backed token store: one JSON file under the config directory.
///
/// Writes go through a temp file + rename so a crash mid-write can never
/// leave a truncated token file behind. On Unix the file is readable by
/// its owner only.
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn io_error(&self, source: std::io::Error) -> SessionError {
        SessionError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<StoredTokens>, SessionError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let json = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        let tokens: StoredTokens = serde_json::from_str(&json)?;
        Ok(Some(tokens))
    }

    fn store(&self, tokens: &StoredTokens) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let json = serde_json::to_string_pretty(tokens)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))
                .map_err(|e| self.io_error(e))?;
        }
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

/// In-memory token store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    inner: Mutex<Option<StoredTokens>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<StoredTokens>, SessionError> {
        Ok(self
            .inner
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    fn store(&self, tokens: &StoredTokens) -> Result<(), SessionError> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = Some(tokens.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.inner.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn pair() -> StoredTokens {
        StoredTokens {
            access: "access-token".to_string(),
            refresh: "refresh-token".to_string(),
        }
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("tokens.json"));

        assert!(store.load().unwrap().is_none());
        store.store(&pair()).unwrap();
        assert_eq!(store.load().unwrap(), Some(pair()));
    }

    #[test]
    fn file_store_clear_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("tokens.json"));

        store.store(&pair()).unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn file_store_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested/deeper/tokens.json"));
        store.store(&pair()).unwrap();
        assert_eq!(store.load().unwrap(), Some(pair()));
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        FileTokenStore::new(&path).store(&pair()).unwrap();

        let reopened = FileTokenStore::new(&path);
        assert_eq!(reopened.load().unwrap(), Some(pair()));
    }

    #[cfg(unix)]
    #[test]
    fn file_store_is_owner_readable_only() {
        use std::os::unix::fs::PermissionsExt;
        let dir = tempdir().unwrap();
        let path = dir.path().join("tokens.json");
        FileTokenStore::new(&path).store(&pair()).unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[test]
    fn memory_store_round_trip() {
        let store = MemoryTokenStore::new();
        store.store(&pair()).unwrap();
        assert_eq!(store.load().unwrap(), Some(pair()));
        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }
}
