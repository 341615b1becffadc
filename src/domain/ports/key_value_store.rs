//! KeyValueStore port - abstraction over the local string store
//!
//! Pages, the GitHub connection and the publish ledger each live under one
//! key as a JSON string. Implementations:
//! - `JsonFileStore` - one file per key on disk
//! - `MemoryStore` - in-memory, for tests and dry runs

use std::path::PathBuf;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid store key '{key}' (allowed: letters, digits, '_' and '-')")]
    InvalidKey { key: String },

    #[error("failed to access store at {path}: {source}")]
    Access {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to lock store at {path}: {message}")]
    Locked { path: PathBuf, message: String },
}

/// Synchronous string key-value store
pub trait KeyValueStore {
    /// Value for `key`, or `None` when absent
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Remove `key`; removing an absent key is not an error
    fn remove(&self, key: &str) -> StoreResult<()>;

    /// All keys currently present, sorted
    fn keys(&self) -> StoreResult<Vec<String>>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        (**self).keys()
    }
}

/// Whether `key` is acceptable to every store implementation
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
