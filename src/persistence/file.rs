//! File-backed key-value store
//!
//! Each key maps to `<dir>/<key>.json`. Writes go to a uniquely named temp
//! file in the same directory (via `tempfile`), which is then renamed over the
//! target, so an interrupted write leaves the previous value intact.
//!
//! Keys are limited to ASCII alphanumerics, `_` and `-`; anything else is
//! rejected rather than rewritten, so two keys never share a file.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{KeyValueStore, StorageError};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the file backing `key`
    pub fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::Rejected(format!("invalid key {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = match self.path_for(key) {
            Ok(path) => path,
            Err(e) => {
                log::warn!("Cannot read key: {}", e);
                return None;
            }
        };
        match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(value.as_bytes())?;
        tmp.persist(&path).map_err(|e| StorageError::Io(e.error))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)?) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::Picker;

    #[test]
    fn test_roundtrip_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(tmp.path().join("nested").join("state"));

        assert_eq!(store.get("pool"), None);
        store.set("pool", "[1,2,3]").unwrap();
        assert_eq!(store.get("pool").as_deref(), Some("[1,2,3]"));
        assert!(store.dir().is_dir());
    }

    #[test]
    fn test_set_leaves_no_temp_file() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(tmp.path());
        store.set("pool", "[]").unwrap();
        store.set("pool", "[4]").unwrap();

        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["pool.json".to_string()]);
    }

    #[test]
    fn test_stale_tmp_path_does_not_block_writes() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("pool.json.tmp")).unwrap();

        let mut store = FileStore::new(tmp.path());
        store.set("pool", "[3]").unwrap();
        assert_eq!(store.get("pool").as_deref(), Some("[3]"));
    }

    #[test]
    fn test_pick_survives_restart_with_stale_tmp_path() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("pool.json.tmp")).unwrap();
        let items: Vec<usize> = (0..5).collect();

        {
            let mut picker = Picker::with_seed(items.clone(), FileStore::new(tmp.path()), "pool", 1);
            assert!(picker.pick().is_some());
        }

        let picker = Picker::with_seed(items, FileStore::new(tmp.path()), "pool", 2);
        assert_eq!(picker.remaining(), 4);
    }

    #[test]
    fn test_remove() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(tmp.path());
        store.set("pool", "[0]").unwrap();
        store.remove("pool").unwrap();
        assert_eq!(store.get("pool"), None);
        // Second remove is a no-op
        store.remove("pool").unwrap();
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(tmp.path());

        for key in ["../etc/passwd", "a.b", "", "with space"] {
            assert!(matches!(store.set(key, "[1]"), Err(StorageError::Rejected(_))));
            assert!(matches!(store.remove(key), Err(StorageError::Rejected(_))));
            assert_eq!(store.get(key), None);
        }
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_distinct_keys_distinct_files() {
        let tmp = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(tmp.path());
        assert!(store.set("a.b", "[1]").is_err());
        store.set("a_b", "[2]").unwrap();
        assert_eq!(store.get("a_b").as_deref(), Some("[2]"));
        assert_eq!(store.get("a.b"), None);
    }
}
