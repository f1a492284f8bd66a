//! Durable key-value storage backends for the cart.
//!
//! The cart persists as one serialized document under a single namespaced
//! key, mirroring the device-local storage of the shipped storefront. The
//! [`StorageBackend`] trait is that narrow read/write surface; the store
//! layered on top owns serialization and never sees backend internals.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use thiserror::Error;

/// Errors that can occur reading or writing the durable storage.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    /// The backend refused the operation (e.g., quota exhausted).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// A durable string-keyed store holding one payload per key.
///
/// `read` of an absent key yields `Ok(None)`; `write` replaces the whole
/// payload. Both are synchronous and complete before returning.
pub trait StorageBackend {
    /// Read the payload stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the backend cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `payload` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the write does not reach durable
    /// storage. Callers treat the in-memory state as authoritative anyway.
    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError>;
}

impl<B: StorageBackend + ?Sized> StorageBackend for &B {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).read(key)
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        (**self).write(key, payload)
    }
}

/// File-backed storage: one JSON document per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileBackend {
    dir: PathBuf,
}

impl FileBackend {
    /// Create a backend rooted at `dir`. The directory is created lazily on
    /// the first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(payload) => Ok(Some(payload)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), payload)?;
        Ok(())
    }
}

/// In-memory storage, used by tests and headless sessions.
///
/// Writes can be switched off with [`MemoryBackend::fail_writes`] to exercise
/// the persistence-failure path without a real quota error.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, String>>,
    fail_writes: Mutex<bool>,
}

impl MemoryBackend {
    /// Create an empty in-memory backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent write fail (or succeed again) on demand.
    pub fn fail_writes(&self, fail: bool) {
        *self.fail_writes.lock().expect("storage mutex poisoned") = fail;
    }

    /// Snapshot of the payload stored under `key`, if any.
    #[must_use]
    pub fn payload(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("storage mutex poisoned")
            .get(key)
            .cloned()
    }
}

impl StorageBackend for MemoryBackend {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self
            .entries
            .lock()
            .expect("storage mutex poisoned")
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        if *self.fail_writes.lock().expect("storage mutex poisoned") {
            return Err(StorageError::Unavailable(
                "simulated write failure".to_owned(),
            ));
        }
        self.entries
            .lock()
            .expect("storage mutex poisoned")
            .insert(key.to_owned(), payload.to_owned());
        Ok(())
    }
}
