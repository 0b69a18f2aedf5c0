//! Local persistence for the user identity and the transcript.
//!
//! Storage is a plain string key-value store. [`FileStore`] keeps one file per
//! key in the platform data directory; [`MemoryStore`] backs tests. The
//! [`PersistenceAdapter`] layers the two application keys on top and treats
//! anything unreadable as absent.

use std::collections::HashMap;
use std::error::Error as StdError;
use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::core::config::data::path_display;
use crate::core::message::Turn;

pub const USER_NAME_KEY: &str = "user_name";
pub const CHAT_HISTORY_KEY: &str = "chat_history";

#[derive(Debug)]
pub enum StoreError {
    Io { path: PathBuf, source: io::Error },
    Persist { path: PathBuf, source: io::Error },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "Failed to access {}: {}", path_display(path), source)
            }
            StoreError::Persist { path, source } => {
                write!(f, "Failed to write {}: {}", path_display(path), source)
            }
        }
    }
}

impl StdError for StoreError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            StoreError::Io { source, .. } | StoreError::Persist { source, .. } => Some(source),
        }
    }
}

pub trait KeyValueStore: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

/// One file per key under a directory.
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store rooted at the per-user data directory.
    pub fn open_default() -> Option<Self> {
        default_data_dir().map(Self::new)
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

/// Replace `path` with `contents` via a synced temp file in the same directory.
///
/// Readers see either the old file or the new one, never a partial write.
pub(crate) fn write_atomically(path: &Path, contents: &str) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut temp_file = NamedTempFile::new_in(dir)?;
    temp_file.write_all(contents.as_bytes())?;
    temp_file.as_file_mut().sync_all()?;
    temp_file.persist(path).map_err(|err| err.error)?;
    Ok(())
}

pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("org", "lucent", "lucent").map(|dirs| dirs.data_dir().to_path_buf())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        write_atomically(&path, value).map_err(|source| StoreError::Persist { path, source })
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io { path, source }),
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Reads and writes the persisted `{ user name, transcript }` snapshot.
///
/// The two keys are written independently; there is no transaction spanning
/// them. Failures never reach the caller: reads degrade to "absent" and
/// writes are logged.
pub struct PersistenceAdapter {
    store: Box<dyn KeyValueStore>,
}

impl PersistenceAdapter {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    pub fn load_user_name(&self) -> Option<String> {
        self.read(USER_NAME_KEY).filter(|name| !name.is_empty())
    }

    /// Stored transcript, or `None` when absent or malformed.
    pub fn load_history(&self) -> Option<Vec<Turn>> {
        let raw = self.read(CHAT_HISTORY_KEY)?;
        match serde_json::from_str::<Vec<Turn>>(&raw) {
            Ok(turns) => Some(turns),
            Err(err) => {
                warn!(error = %err, "ignoring malformed stored chat history");
                None
            }
        }
    }

    /// True when a non-empty transcript is stored.
    pub fn has_history(&self) -> bool {
        self.load_history().is_some_and(|turns| !turns.is_empty())
    }

    /// Overwrite both keys with the current snapshot.
    pub fn save(&mut self, user_name: Option<&str>, turns: &[Turn]) {
        match serde_json::to_string(turns) {
            Ok(json) => self.write(CHAT_HISTORY_KEY, &json),
            Err(err) => warn!(error = %err, "failed to serialize chat history"),
        }
        self.write(USER_NAME_KEY, user_name.unwrap_or_default());
        debug!(turns = turns.len(), "persisted session snapshot");
    }

    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.store.remove(CHAT_HISTORY_KEY)?;
        self.store.remove(USER_NAME_KEY)
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(key, error = %err, "treating unreadable entry as absent");
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            warn!(key, error = %err, "failed to persist entry");
        }
    }
}
