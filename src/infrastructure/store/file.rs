//! File-backed key-value store
//!
//! Each key lives in `<dir>/<key>.json`. Writes go through a temp file and a
//! rename while holding an exclusive lock on `<dir>/.lock`, so two `folio`
//! processes never interleave a write.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::trace;

use crate::domain::ports::{is_valid_key, KeyValueStore, StoreError, StoreResult};
use crate::infrastructure::fs::atomic_write;

const LOCK_FILE: &str = ".lock";
const EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Store rooted at `dir`; the directory is created on first write
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, key: &str) -> StoreResult<PathBuf> {
        if !is_valid_key(key) {
            return Err(StoreError::InvalidKey {
                key: key.to_string(),
            });
        }
        Ok(self.dir.join(format!("{}.{}", key, EXTENSION)))
    }

    fn access_error(&self, path: &Path, source: std::io::Error) -> StoreError {
        StoreError::Access {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Run `f` while holding the exclusive store lock
    fn with_lock<T>(&self, f: impl FnOnce() -> StoreResult<T>) -> StoreResult<T> {
        fs::create_dir_all(&self.dir).map_err(|e| self.access_error(&self.dir, e))?;

        let lock_path = self.dir.join(LOCK_FILE);
        let lock_file = fs::File::create(&lock_path).map_err(|e| self.access_error(&lock_path, e))?;
        lock_file
            .lock_exclusive()
            .map_err(|e| StoreError::Locked {
                path: lock_path.clone(),
                message: e.to_string(),
            })?;

        let result = f();

        let _ = lock_file.unlock();
        result
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.access_error(&path, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let path = self.key_path(key)?;
        self.with_lock(|| {
            atomic_write(&path, value.as_bytes()).map_err(|e| self.access_error(&path, e))
        })?;
        trace!(key, bytes = value.len(), "stored value");
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let path = self.key_path(key)?;
        self.with_lock(|| match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(self.access_error(&path, e)),
        })
    }

    fn keys(&self) -> StoreResult<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(self.access_error(&self.dir, e)),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| self.access_error(&self.dir, e))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if is_valid_key(stem) {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
