//! The key-value persistence seam and its two implementations.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::RwLock;

use serde_json::Value;

/// Errors surfaced by a persistence backend.
///
/// Read paths never produce these: corrupt or missing data degrades to
/// `None` and the caller substitutes defaults. Only writes can fail.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

/// Abstract key-value configuration store.
///
/// Keys are flat strings, values arbitrary JSON documents. Implementations
/// must be safe for concurrent use; the stores above them add their own
/// caching and merging.
pub trait KvBackend: Send + Sync {
    /// Fetch the value stored under `key`, or `None` when absent.
    fn load(&self, key: &str) -> Option<Value>;

    /// Store `value` under `key`, replacing any previous value.
    fn store(&self, key: &str, value: Value) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// In-memory backend
// ---------------------------------------------------------------------------

/// Volatile backend for tests and ephemeral deployments.
#[derive(Default)]
pub struct MemoryBackend {
    entries: RwLock<HashMap<String, Value>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvBackend for MemoryBackend {
    fn load(&self, key: &str) -> Option<Value> {
        self.entries
            .read()
            .expect("backend lock poisoned")
            .get(key)
            .cloned()
    }

    fn store(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.entries
            .write()
            .expect("backend lock poisoned")
            .insert(key.to_string(), value);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// JSON-file backend
// ---------------------------------------------------------------------------

/// File-backed backend: one JSON object per file, keys at the top level.
///
/// The whole document is held in memory and rewritten on every store, via a
/// temp-file rename so readers of the file never observe a partial write.
pub struct JsonFileBackend {
    path: PathBuf,
    entries: RwLock<HashMap<String, Value>>,
}

impl JsonFileBackend {
    /// Open (or lazily create) the backing file.
    ///
    /// A missing file starts empty; an unreadable or corrupt file degrades
    /// to empty with a warning rather than failing startup.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<HashMap<String, Value>>(&raw) {
                Ok(map) => map,
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "Corrupt backing file, starting empty");
                    HashMap::new()
                }
            },
            Err(error) if error.kind() == io::ErrorKind::NotFound => HashMap::new(),
            Err(error) => {
                tracing::warn!(path = %path.display(), %error, "Unreadable backing file, starting empty");
                HashMap::new()
            }
        };

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    fn flush(&self, entries: &HashMap<String, Value>) -> Result<(), StoreError> {
        let payload = serde_json::to_string_pretty(entries)?;

        let tmp = self.path.with_extension("tmp");
        std::fs::write(&tmp, payload)?;
        std::fs::rename(&tmp, &self.path)?;

        Ok(())
    }
}

impl KvBackend for JsonFileBackend {
    fn load(&self, key: &str) -> Option<Value> {
        self.entries
            .read()
            .expect("backend lock poisoned")
            .get(key)
            .cloned()
    }

    fn store(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let mut entries = self.entries.write().expect("backend lock poisoned");
        entries.insert(key.to_string(), value);
        self.flush(&entries)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
