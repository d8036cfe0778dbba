#![forbid(unsafe_code)]

//! Durable client storage.
//!
//! The core persists exactly one value (the reduced-motion override) but
//! talks to storage through the [`ClientStorage`] trait so the host can back
//! it with `localStorage`, a file, or nothing at all.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Caller fallback |
//! |---------|-------|-----------------|
//! | `Unavailable` | Storage disabled (private mode, sandboxed embed) | Session-only value |
//! | `QuotaExceeded` | Storage full | Session-only value |
//! | `Io` | File backend could not read/write | Session-only value |
//! | `Corrupt` | Stored blob not decodable | Treat as empty |

use std::cell::RefCell;
use std::rc::Rc;

/// Errors from storage operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The storage backend does not exist in this environment.
    Unavailable,
    /// The backend refused the write for lack of space.
    QuotaExceeded,
    /// An I/O error from a file-backed store.
    Io(String),
    /// Stored data could not be decoded.
    Corrupt(String),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "client storage is unavailable"),
            Self::QuotaExceeded => write!(f, "client storage quota exceeded"),
            Self::Io(msg) => write!(f, "storage I/O error: {msg}"),
            Self::Corrupt(msg) => write!(f, "stored data is corrupt: {msg}"),
        }
    }
}

impl std::error::Error for StorageError {}

/// Key/value string storage owned by the host.
pub trait ClientStorage {
    /// Read a value. `Ok(None)` means the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage; lives as long as the value.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: ahash::AHashMap<String, String>,
}

impl MemoryStorage {
    /// Create empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: pre-populate an entry.
    #[must_use]
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Number of stored entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ClientStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Shared storage: several consumers may hold the same backend.
impl<S: ClientStorage + ?Sized> ClientStorage for Rc<RefCell<S>> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.borrow_mut().set(key, value)
    }
}

/// Storage for environments without any durable store.
///
/// Every operation fails with [`StorageError::Unavailable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStorage;

impl ClientStorage for UnavailableStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

#[cfg(feature = "state-persistence")]
pub use file::FileStorage;

#[cfg(feature = "state-persistence")]
mod file {
    use std::collections::BTreeMap;
    use std::path::{Path, PathBuf};

    use super::{ClientStorage, StorageError};

    /// JSON-file-backed storage for native hosts.
    ///
    /// The file holds a single JSON object of string values. Every `set`
    /// rewrites the whole file.
    #[derive(Debug, Clone)]
    pub struct FileStorage {
        path: PathBuf,
        entries: BTreeMap<String, String>,
    }

    impl FileStorage {
        /// Open (or lazily create) the store at `path`.
        ///
        /// A missing file is an empty store. An undecodable file is an
        /// error so the caller can decide whether to discard it.
        pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
            let path = path.as_ref().to_path_buf();
            let entries = match std::fs::read_to_string(&path) {
                Ok(text) if text.trim().is_empty() => BTreeMap::new(),
                Ok(text) => serde_json::from_str(&text)
                    .map_err(|e| StorageError::Corrupt(e.to_string()))?,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
                Err(e) => return Err(StorageError::Io(e.to_string())),
            };
            Ok(Self { path, entries })
        }

        /// Location of the backing file.
        #[must_use]
        pub fn path(&self) -> &Path {
            &self.path
        }

        fn flush(&self) -> Result<(), StorageError> {
            let json = serde_json::to_string_pretty(&self.entries)
                .map_err(|e| StorageError::Io(e.to_string()))?;
            std::fs::write(&self.path, json).map_err(|e| StorageError::Io(e.to_string()))
        }
    }

    impl ClientStorage for FileStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.entries.get(key).cloned())
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
            let previous = self.entries.insert(key.to_string(), value.to_string());
            if let Err(err) = self.flush() {
                // Keep memory and disk in agreement.
                match previous {
                    Some(old) => self.entries.insert(key.to_string(), old),
                    None => self.entries.remove(key),
                };
                return Err(err);
            }
            Ok(())
        }
    }
}
