//! Persistence for the unwatched pool
//!
//! Storage is a plain string key-value medium. Encoding and validation of the
//! pool live in [`PoolStore`], so a backend only has to move strings around.
//!
//! Backends:
//! - [`MemoryStore`]: in-process map (tests, no durable storage available)
//! - `FileStore`: one file per key under a directory (native only)
//! - `LocalStore`: browser LocalStorage (wasm32 only)

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(target_arch = "wasm32")]
mod local;
mod memory;
mod pool;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;
pub use memory::MemoryStore;
pub use pool::{PoolLoadError, PoolStore};

use thiserror::Error;

/// Errors produced by storage backends.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage unavailable")]
    Unavailable,

    #[error("write rejected: {0}")]
    Rejected(String),
}

/// String key-value storage.
///
/// Reads never fail: anything that cannot be read is reported as absent.
pub trait KeyValueStore {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` under `key`, replacing any prior value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}
