//! Session-scoped key-value storage.
//!
//! Holds the single piece of persisted state: whether this session already
//! passed the credential gate. The store is injected so the initial-phase
//! decision can be tested without touching the filesystem.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{SessionError, persist::replace_file};

/// Key of the unlocked flag.
pub const UNLOCK_KEY: &str = "bbs-auth";

/// Value stored under [`UNLOCK_KEY`] once unlocked.
pub const UNLOCK_VALUE: &str = "true";

/// Session-scoped key-value store.
pub trait SessionStore: Send {
    /// Value stored under `key`. `None` if absent.
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError>;

    /// Remove every entry.
    fn clear(&mut self) -> Result<(), SessionError>;
}

impl<S: SessionStore + ?Sized> SessionStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        (**self).set(key, value)
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        (**self).clear()
    }
}

/// Whether the session already passed the gate.
///
/// Unreadable storage counts as locked.
pub fn is_unlocked<S: SessionStore + ?Sized>(store: &S) -> bool {
    match store.get(UNLOCK_KEY) {
        Ok(value) => value.as_deref() == Some(UNLOCK_VALUE),
        Err(e) => {
            tracing::warn!(error = %e, "session flag unreadable, starting locked");
            false
        },
    }
}

/// Record that the session passed the gate.
pub fn mark_unlocked<S: SessionStore + ?Sized>(store: &mut S) -> Result<(), SessionError> {
    store.set(UNLOCK_KEY, UNLOCK_VALUE)
}

/// In-memory store. Lives as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: BTreeMap<String, String>,
}

impl MemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that is already unlocked.
    pub fn unlocked() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(UNLOCK_KEY.to_owned(), UNLOCK_VALUE.to_owned());
        Self { entries }
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        self.entries.clear();
        Ok(())
    }
}

/// Store backed by a JSON object on disk.
///
/// Scope is decided by the caller through the path: a path derived from the
/// terminal session makes the flag die with that session.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileSessionStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SessionError> {
        let path = path.as_ref().to_path_buf();
        let entries = if path.exists() {
            let raw = fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            BTreeMap::new()
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "session store opened");
        Ok(Self { path, entries })
    }

    /// Backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> Result<(), SessionError> {
        replace_file(&self.path, |file| {
            serde_json::to_writer_pretty(file, &self.entries).map_err(SessionError::from)
        })
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), SessionError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        self.persist()
    }

    fn clear(&mut self) -> Result<(), SessionError> {
        self.entries.clear();
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_store_is_locked() {
        assert!(!is_unlocked(&MemorySessionStore::new()));
    }

    #[test]
    fn mark_unlocked_round_trips() {
        let mut store = MemorySessionStore::new();
        mark_unlocked(&mut store).unwrap();

        assert!(is_unlocked(&store));
        assert_eq!(store.get(UNLOCK_KEY).unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn other_values_do_not_unlock() {
        let mut store = MemorySessionStore::new();
        store.set(UNLOCK_KEY, "TRUE").unwrap();
        assert!(!is_unlocked(&store));
    }

    #[test]
    fn file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");

        let mut store = FileSessionStore::open(&path).unwrap();
        assert!(!is_unlocked(&store));
        mark_unlocked(&mut store).unwrap();

        let reopened = FileSessionStore::open(&path).unwrap();
        assert!(is_unlocked(&reopened));
    }

    #[test]
    fn file_store_clear_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut store = FileSessionStore::open(&path).unwrap();
        mark_unlocked(&mut store).unwrap();
        store.clear().unwrap();

        assert!(!path.exists());
        assert!(!is_unlocked(&FileSessionStore::open(&path).unwrap()));
    }

    #[test]
    fn file_store_rewrites_leave_one_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let mut store = FileSessionStore::open(&path).unwrap();
        store.set("a", "1").unwrap();
        mark_unlocked(&mut store).unwrap();

        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
        assert!(is_unlocked(&FileSessionStore::open(&path).unwrap()));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "not json").unwrap();

        assert!(matches!(FileSessionStore::open(&path), Err(SessionError::Format(_))));
    }
}
