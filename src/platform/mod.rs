//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Durable storage (LocalStorage on web, files natively)
//! - The JS-facing booth object (web)

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::persistence::KeyValueStore;
use crate::settings::Settings;

/// Open the platform's durable key-value store.
///
/// Falls back to an in-memory store when LocalStorage is unavailable, so the
/// booth keeps working for the session without remembering it.
#[cfg(target_arch = "wasm32")]
pub fn open_store(_settings: &Settings) -> Box<dyn KeyValueStore> {
    match crate::persistence::LocalStore::open() {
        Some(store) => Box::new(store),
        None => {
            log::warn!("LocalStorage unavailable, picks will not persist");
            Box::new(crate::persistence::MemoryStore::new())
        }
    }
}

/// Open the platform's durable key-value store (files under `state_dir`).
#[cfg(not(target_arch = "wasm32"))]
pub fn open_store(settings: &Settings) -> Box<dyn KeyValueStore> {
    Box::new(crate::persistence::FileStore::new(&settings.state_dir))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_native_store_lives_in_state_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let settings = Settings {
            state_dir: tmp.path().to_path_buf(),
            ..Settings::default()
        };

        let mut store = open_store(&settings);
        store.set(&settings.storage_key, "[0]").unwrap();
        assert!(tmp.path().join("cinema_unwatched_indices_v1.json").is_file());
        assert_eq!(store.get(&settings.storage_key).as_deref(), Some("[0]"));
    }
}
