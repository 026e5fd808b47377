//! `KeyValueStore` implementations.

use std::{
    collections::HashMap,
    fs,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
    sync::Arc,
};

use parking_lot::RwLock;
use quiz_funnel_types::{KeyValueStore, StorageError};
use tracing::debug;

/// Process-local store. Clones are handles to the same storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects writes once keys and values exceed `bytes` in total.
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: Arc::default(),
            quota: Some(bytes),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries.write();
        if let Some(quota) = self.quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            if used + key.len() + value.len() > quota {
                return Err(StorageError::QuotaExceeded);
            }
        }
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// Store keeping one JSON file per key inside a directory.
///
/// The directory is created on first write. Writes go through a temporary
/// file and a rename so a crash never leaves a half-written blob behind.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.dir.join(format!("{name}.json"))
    }
}

/// Permission problems make the whole store unusable; anything else is plain I/O.
fn storage_error(path: &Path, e: io::Error) -> StorageError {
    match e.kind() {
        ErrorKind::PermissionDenied | ErrorKind::ReadOnlyFilesystem => {
            StorageError::Unavailable(format!("{}: {e}", path.display()))
        }
        _ => StorageError::Io(e),
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(storage_error(&path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir).map_err(|e| storage_error(&self.dir, e))?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| storage_error(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| storage_error(&path, e))?;
        debug!(path = %path.display(), bytes = value.len(), "wrote store entry");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(storage_error(&path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_handles_share_entries() {
        let store = MemoryStore::new();
        let other = store.clone();

        store.set("k", "v").unwrap();
        assert_eq!(other.get("k").unwrap().as_deref(), Some("v"));

        other.remove("k").unwrap();
        assert!(store.is_empty());
        other.remove("k").unwrap();
    }

    #[test]
    fn memory_store_quota() {
        let store = MemoryStore::with_quota(10);
        store.set("key", "1234").unwrap();
        // Replacing an entry only counts the new value.
        store.set("key", "1234567").unwrap();
        assert!(matches!(
            store.set("key", "12345678"),
            Err(StorageError::QuotaExceeded)
        ));
        assert_eq!(store.get("key").unwrap().as_deref(), Some("1234567"));
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state"));

        assert_eq!(store.get("emagrecenter-quiz").unwrap(), None);
        store.set("emagrecenter-quiz", r#"{"step":3}"#).unwrap();
        assert_eq!(
            store.get("emagrecenter-quiz").unwrap().as_deref(),
            Some(r#"{"step":3}"#)
        );

        store.remove("emagrecenter-quiz").unwrap();
        assert_eq!(store.get("emagrecenter-quiz").unwrap(), None);
        store.remove("emagrecenter-quiz").unwrap();
    }

    #[test]
    fn file_store_sanitizes_keys() {
        let store = FileStore::new("/tmp/quiz");
        assert_eq!(
            store.path_for("../etc/passwd"),
            PathBuf::from("/tmp/quiz/.._etc_passwd.json")
        );
    }

    #[test]
    fn permission_errors_mean_unavailable() {
        let path = Path::new("/var/lib/quiz/emagrecenter-quiz.json");
        let denied = io::Error::from(ErrorKind::PermissionDenied);
        assert!(matches!(
            storage_error(path, denied),
            StorageError::Unavailable(reason) if reason.starts_with("/var/lib/quiz/")
        ));

        let other = io::Error::from(ErrorKind::InvalidData);
        assert!(matches!(storage_error(path, other), StorageError::Io(_)));
    }

    #[test]
    fn file_store_reports_io_errors() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        fs::write(&blocker, "x").unwrap();

        let store = FileStore::new(&blocker);
        assert!(matches!(store.set("k", "v"), Err(StorageError::Io(_))));
    }
}
