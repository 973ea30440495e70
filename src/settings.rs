//! Booth settings
//!
//! Where the unwatched pool is stored and, optionally, a fixed RNG seed.
//! On the web these live in LocalStorage next to the pool; natively they come
//! from a JSON file named by `TICKET_BOOTH_SETTINGS`, with environment
//! overrides on top.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::consts::STORAGE_KEY;
use crate::persistence::KeyValueStore;

/// Environment variable naming the settings file (native)
pub const SETTINGS_FILE_ENV: &str = "TICKET_BOOTH_SETTINGS";
/// Environment override for `state_dir` (native)
pub const STATE_DIR_ENV: &str = "TICKET_BOOTH_STATE_DIR";
/// Environment override for `seed` (native)
pub const SEED_ENV: &str = "TICKET_BOOTH_SEED";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Key the unwatched pool is stored under
    pub storage_key: String,
    /// Directory for file-backed state (native only)
    pub state_dir: PathBuf,
    /// Fixed RNG seed for reproducible draws; entropy when unset
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            state_dir: PathBuf::from(".ticket-booth"),
            seed: None,
        }
    }
}

impl Settings {
    /// Parse settings JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Apply overrides from a variable lookup (the environment, in practice).
    ///
    /// Unparseable seeds are ignored with a warning.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(STATE_DIR_ENV) {
            self.state_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(SEED_ENV) {
            match raw.trim().parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => log::warn!("Ignoring invalid {}: {:?}", SEED_ENV, raw),
            }
        }
    }

    /// Key the settings are stored under in a [`KeyValueStore`]
    pub const STORE_KEY: &'static str = "ticket_booth_settings";

    /// Load settings stored under [`Self::STORE_KEY`], falling back to defaults
    pub fn load_from_store<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(Self::STORE_KEY).map(|json| Self::from_json(&json)) {
            Some(Ok(settings)) => {
                log::info!("Loaded stored settings");
                settings
            }
            Some(Err(e)) => {
                log::warn!("Invalid stored settings: {}", e);
                Self::default()
            }
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        match crate::persistence::LocalStore::open() {
            Some(store) => Self::load_from_store(&store),
            None => {
                log::info!("LocalStorage unavailable, using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from the file named by `TICKET_BOOTH_SETTINGS`, then
    /// apply environment overrides. A missing or broken file means defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let mut settings = match std::env::var_os(SETTINGS_FILE_ENV) {
            Some(path) => Self::load_from(std::path::Path::new(&path)),
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        };
        settings.apply_overrides(|name| std::env::var(name).ok());
        settings
    }

    /// Load settings from a JSON file, falling back to defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.storage_key, "cinema_unwatched_indices_v1");
        assert_eq!(settings.seed, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{"seed": 77}"#).unwrap();
        assert_eq!(settings.seed, Some(77));
        assert_eq!(settings.storage_key, STORAGE_KEY);
        assert_eq!(settings.state_dir, PathBuf::from(".ticket-booth"));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> =
            HashMap::from([(STATE_DIR_ENV, "/tmp/booth"), (SEED_ENV, " 12 ")]);
        let mut settings = Settings::default();
        settings.apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(settings.state_dir, PathBuf::from("/tmp/booth"));
        assert_eq!(settings.seed, Some(12));
    }

    #[test]
    fn test_bad_seed_override_ignored() {
        let mut settings = Settings {
            seed: Some(3),
            ..Settings::default()
        };
        settings.apply_overrides(|k| (k == SEED_ENV).then(|| "soon".to_string()));
        assert_eq!(settings.seed, Some(3));
    }

    #[test]
    fn test_load_from_store() {
        let mut mem = MemoryStore::new();
        assert_eq!(Settings::load_from_store(&mem), Settings::default());

        mem.set(Settings::STORE_KEY, r#"{"seed": 5}"#).unwrap();
        assert_eq!(Settings::load_from_store(&mem).seed, Some(5));

        mem.set(Settings::STORE_KEY, "[1, 2]").unwrap();
        assert_eq!(Settings::load_from_store(&mem), Settings::default());
    }

    #[test]
    fn test_load_from_broken_file_falls_back() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("settings.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert_eq!(Settings::load_from(&path), Settings::default());

        std::fs::write(&path, r#"{"storage_key": "alt"}"#).unwrap();
        assert_eq!(Settings::load_from(&path).storage_key, "alt");
    }
}
