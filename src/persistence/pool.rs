//! Unwatched-pool store
//!
//! Persists the ids not yet drawn in the current cycle as a JSON array under a
//! single key. Loading is defensive: entries that are not integers in
//! `0..catalog_len` are dropped, duplicates are dropped, and anything that does
//! not leave a usable pool is reported as a [`PoolLoadError`] so the caller can
//! start a fresh cycle.

use std::collections::HashSet;

use serde_json::Value;
use thiserror::Error;

use super::{KeyValueStore, StorageError};

/// Why a persisted pool could not be used.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PoolLoadError {
    #[error("no pool stored")]
    Missing,

    #[error("stored pool is not valid JSON: {0}")]
    Malformed(String),

    #[error("stored pool is not a list")]
    NotAList,

    #[error("stored pool has no valid ids")]
    Empty,
}

/// Reads and writes the unwatched pool through a [`KeyValueStore`].
#[derive(Debug)]
pub struct PoolStore<S> {
    store: S,
    key: String,
    catalog_len: usize,
}

impl<S: KeyValueStore> PoolStore<S> {
    /// Pool store for a catalog of `catalog_len` items, persisted under `key`.
    pub fn new(store: S, key: impl Into<String>, catalog_len: usize) -> Self {
        Self {
            store,
            key: key.into(),
            catalog_len,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn catalog_len(&self) -> usize {
        self.catalog_len
    }

    /// Borrow the underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the persisted pool, keeping only valid, distinct ids.
    pub fn load(&self) -> Result<Vec<usize>, PoolLoadError> {
        let raw = self.store.get(&self.key).ok_or(PoolLoadError::Missing)?;
        let value: Value =
            serde_json::from_str(&raw).map_err(|e| PoolLoadError::Malformed(e.to_string()))?;
        let Value::Array(entries) = value else {
            return Err(PoolLoadError::NotAList);
        };

        let mut seen = HashSet::with_capacity(entries.len());
        let ids: Vec<usize> = entries
            .iter()
            .filter_map(as_index)
            .filter(|&id| id < self.catalog_len)
            .filter(|&id| seen.insert(id))
            .collect();

        let dropped = entries.len() - ids.len();
        if dropped > 0 {
            log::warn!("Dropped {} invalid entries from stored pool", dropped);
        }

        if ids.is_empty() {
            return Err(PoolLoadError::Empty);
        }
        Ok(ids)
    }

    /// Persist `ids`, overwriting any prior value.
    pub fn save(&mut self, ids: &[usize]) -> Result<(), StorageError> {
        let json = serde_json::to_string(ids).map_err(|e| StorageError::Rejected(e.to_string()))?;
        self.store.set(&self.key, &json)
    }

    /// Forget the persisted pool.
    pub fn clear(&mut self) -> Result<(), StorageError> {
        self.store.remove(&self.key)
    }
}

/// Non-negative integer value, including integral floats like `3.0`
fn as_index(value: &Value) -> Option<usize> {
    if let Some(n) = value.as_u64() {
        return usize::try_from(n).ok();
    }
    let f = value.as_f64()?;
    if f >= 0.0 && f.fract() == 0.0 && f <= u32::MAX as f64 {
        Some(f as usize)
    } else {
        None
    }
}
