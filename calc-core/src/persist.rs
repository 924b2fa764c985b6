//! Best-effort persistence of the history and variables to a key-value blob store.
//!
//! Both are stored as JSON. Failures are returned to the caller, which logs them and carries on
//! with the in-memory state.

use crate::{
    history::{History, HistoryEntry, MAX_STORED_ID},
    variables::{is_valid_name, Variables},
};
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    collections::{BTreeMap, HashMap},
    fmt,
    fs,
    io,
    path::PathBuf,
};

/// An error that occurred while reading or writing a blob.
#[derive(Debug)]
pub enum PersistError {
    /// The underlying storage failed.
    Io(io::Error),

    /// A stored blob is not valid JSON of the expected shape.
    Json(serde_json::Error),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "storage error: {}", err),
            Self::Json(err) => write!(f, "malformed data: {}", err),
        }
    }
}

impl std::error::Error for PersistError {}

impl From<io::Error> for PersistError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err)
    }
}

/// A store of string blobs addressed by key.
pub trait BlobStore {
    /// Reads the blob stored under `key`, if any.
    fn load(&self, key: &str) -> Result<Option<String>, PersistError>;

    /// Stores `blob` under `key`, replacing any previous blob.
    fn save(&mut self, key: &str, blob: &str) -> Result<(), PersistError>;

    /// Removes the blob stored under `key`. Removing a missing blob is not an error.
    fn clear(&mut self, key: &str) -> Result<(), PersistError>;
}

/// A [`BlobStore`] that keeps blobs in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    blobs: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given blob.
    pub fn with_blob(mut self, key: impl Into<String>, blob: impl Into<String>) -> Self {
        self.blobs.insert(key.into(), blob.into());
        self
    }

    /// Returns the blob stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.blobs.get(key).map(String::as_str)
    }
}

impl BlobStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), PersistError> {
        self.blobs.insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), PersistError> {
        self.blobs.remove(key);
        Ok(())
    }
}

/// A [`BlobStore`] that keeps each blob in a `<key>.json` file inside a directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store in the given directory. The directory is created when the first blob is
    /// saved.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, PersistError> {
        match fs::read_to_string(self.path(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn save(&mut self, key: &str, blob: &str) -> Result<(), PersistError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), blob)?;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), PersistError> {
        match fs::remove_file(self.path(key)) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err.into()),
            _ => Ok(()),
        }
    }
}

/// A history entry as stored, where older data may lack the `id` and `timestamp` fields.
#[derive(Deserialize)]
struct StoredEntry {
    id: Option<u64>,
    expression: String,
    result: String,
    timestamp: Option<i64>,
}

/// Assigns ids to stored entries.
///
/// Entries without an id receive their 1-based position. If the resulting ids are not strictly
/// increasing, or any id is `0` or above [`MAX_STORED_ID`], every entry is renumbered by
/// position.
fn migrate(stored: Vec<StoredEntry>) -> Vec<HistoryEntry> {
    let mut entries = stored
        .into_iter()
        .enumerate()
        .map(|(i, entry)| HistoryEntry {
            id: entry.id.unwrap_or(i as u64 + 1),
            expression: entry.expression,
            result: entry.result,
            timestamp: entry.timestamp.unwrap_or_default(),
        })
        .collect::<Vec<_>>();

    let out_of_range = entries.iter().any(|entry| entry.id == 0 || entry.id > MAX_STORED_ID);
    let out_of_order = entries.windows(2).any(|pair| pair[0].id >= pair[1].id);
    if out_of_range || out_of_order {
        warn!("history ids are out of order or out of range, renumbering {} entries", entries.len());
        for (i, entry) in entries.iter_mut().enumerate() {
            entry.id = i as u64 + 1;
        }
    }

    entries
}

/// Loads the history stored under `key`. A missing blob is an empty history.
pub fn load_history(store: &impl BlobStore, key: &str, limit: usize) -> Result<History, PersistError> {
    let Some(blob) = store.load(key)? else {
        return Ok(History::new(limit));
    };

    let stored = serde_json::from_str::<Vec<StoredEntry>>(&blob)?;
    Ok(History::from_entries(migrate(stored), limit))
}

/// Stores the history under `key`.
pub fn save_history(store: &mut impl BlobStore, key: &str, history: &History) -> Result<(), PersistError> {
    let blob = serde_json::to_string(history.entries())?;
    store.save(key, &blob)
}

/// The variables as stored: a JSON object from name to value.
#[derive(Deserialize, Serialize)]
#[serde(transparent)]
struct StoredVariables(BTreeMap<String, f64>);

/// Loads the variables stored under `key`. A missing blob is an empty set of variables.
///
/// Entries whose name is not a valid variable name, or whose value is not finite, are dropped.
pub fn load_variables(store: &impl BlobStore, key: &str) -> Result<Variables, PersistError> {
    let mut variables = Variables::new();
    let Some(blob) = store.load(key)? else {
        return Ok(variables);
    };

    let StoredVariables(stored) = serde_json::from_str(&blob)?;
    for (name, value) in stored {
        let mut chars = name.chars();
        let valid = match (chars.next(), chars.next()) {
            (Some(c), None) if is_valid_name(c) => variables.set(c, value),
            _ => false,
        };
        if !valid {
            warn!("ignoring invalid persisted variable '{}' = {}", name, value);
        }
    }
    Ok(variables)
}

/// Stores the variables under `key`.
pub fn save_variables(store: &mut impl BlobStore, key: &str, variables: &Variables) -> Result<(), PersistError> {
    let stored = StoredVariables(
        variables
            .iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect(),
    );
    let blob = serde_json::to_string(&stored)?;
    store.save(key, &blob)
}
