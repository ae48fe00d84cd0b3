//! Token Storage
//!
//! A single durable entry: the bearer token string. No entry means no
//! session.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Durable home of the bearer token
pub trait TokenStore {
    /// Stored token, if any
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replace the stored token
    fn save(&self, token: &str) -> Result<(), StoreError>;

    /// Forget the stored token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), StoreError>;
}

impl<T: TokenStore + ?Sized> TokenStore for Arc<T> {
    fn load(&self) -> Result<Option<String>, StoreError> {
        (**self).load()
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        (**self).save(token)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }
}

/// Token store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Token file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Token kept in a file under the user's data directory
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// A leading `~/` is expanded to the home directory
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: expand_home(path.as_ref()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.io_error(e)),
        }
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);

        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            // Tighten an existing file before the new token lands in it
            if self.path.exists() {
                std::fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
                    .map_err(|e| self.io_error(e))?;
            }
            options.mode(0o600);
        }

        let mut file = options.open(&self.path).map_err(|e| self.io_error(e))?;
        file.write_all(token.as_bytes()).map_err(|e| self.io_error(e))?;

        tracing::debug!(path = ?self.path, "Stored session token");
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                tracing::debug!(path = ?self.path, "Removed session token");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.io_error(e)),
        }
    }
}

fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}

/// Process-local store, for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.token.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.slot().clone())
    }

    fn save(&self, token: &str) -> Result<(), StoreError> {
        *self.slot() = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token"));

        assert_eq!(store.load().unwrap(), None);

        store.save("tok-1").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("tok-1"));

        store.save("tok-2").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("tok-2"));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn test_clear_without_token_is_ok() {
        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));
        store.clear().unwrap();
    }

    #[test]
    fn test_blank_file_means_no_token() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "  \n").unwrap();

        let store = FileTokenStore::new(&path);
        assert_eq!(store.load().unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_token_file_is_private() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("token"));
        store.save("tok-1").unwrap();

        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_existing_readable_file_is_tightened() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let path = dir.path().join("token");
        std::fs::write(&path, "old-token-that-is-longer").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        let store = FileTokenStore::new(&path);
        store.save("tok-1").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "tok-1");
    }

    #[test]
    fn test_home_expansion() {
        let store = FileTokenStore::new("~/desk/token");
        if let Some(home) = dirs::home_dir() {
            assert_eq!(store.path(), home.join("desk").join("token"));
        }

        let plain = FileTokenStore::new("/var/lib/desk/token");
        assert_eq!(plain.path(), Path::new("/var/lib/desk/token"));
    }

    #[test]
    fn test_memory_store_shared_through_arc() {
        let store = Arc::new(MemoryTokenStore::with_token("tok-1"));
        let handle = Arc::clone(&store);

        assert_eq!(handle.load().unwrap().as_deref(), Some("tok-1"));
        handle.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}
