//! JSON persistence for small pieces of application state.
//!
//! Each value lives in its own `<base>/<key>.json` file. The directory is
//! created on demand before every read and write.

use crate::config::{APP_ID, CACHED_PATHS_LIST_KEY, SAVES_DIR_NAME};
use crate::error::{AppError, Result};
use log::{error, info, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

/// Typed logical name of a persisted value.
pub struct StoreKey<T> {
    name: &'static str,
    _value: PhantomData<fn() -> T>,
}

impl<T> StoreKey<T> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _value: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }
}

/// Key of the list of image paths currently displayed.
pub const CACHED_PATHS_LIST: StoreKey<Vec<String>> = StoreKey::new(CACHED_PATHS_LIST_KEY);

/// Stores JSON files under a single base directory.
#[derive(Debug, Clone)]
pub struct PathListStore {
    base: PathBuf,
}

impl PathListStore {
    /// Creates a store writing directly into `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Creates a store in the saves directory below an application data root.
    pub fn in_data_root(root: &Path) -> Self {
        Self::new(root.join(SAVES_DIR_NAME))
    }

    /// Store in the platform data directory.
    ///
    /// - Linux: ~/.local/share/gallery-preview/.gamefiles
    /// - macOS: ~/Library/Application Support/gallery-preview/.gamefiles
    /// - Windows: %APPDATA%\gallery-preview\.gamefiles
    pub fn default_location() -> Self {
        let root = dirs::data_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_ID);
        Self::in_data_root(&root)
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Full path of the file backing `key`.
    pub fn file_path<T>(&self, key: &StoreKey<T>) -> PathBuf {
        self.base.join(format!("{}.json", key.name()))
    }

    /// Serializes `value` and writes it to the file backing `key`.
    ///
    /// The file is written next to the target and renamed over it, so a
    /// failed write leaves the previous contents in place.
    pub fn save<T: Serialize>(&self, key: &StoreKey<T>, value: &T) -> Result<()> {
        self.ensure_directory();
        let full_path = self.file_path(key);

        let write_error = |reason: String| AppError::PersistenceWrite {
            key: key.name().to_string(),
            reason,
        };

        let result = serde_json::to_vec(value)
            .map_err(|e| write_error(e.to_string()))
            .and_then(|json| {
                let tmp_path = full_path.with_extension("json.tmp");
                fs::write(&tmp_path, json)
                    .and_then(|_| fs::rename(&tmp_path, &full_path))
                    .map_err(|e| write_error(e.to_string()))
            });

        match &result {
            Ok(()) => info!("Saved {} to {}", key.name(), full_path.display()),
            Err(e) => error!("{}", e),
        }
        result
    }

    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing was saved yet or when the saved file
    /// is malformed.
    pub fn load<T: DeserializeOwned>(&self, key: &StoreKey<T>) -> Result<Option<T>> {
        self.ensure_directory();
        let full_path = self.file_path(key);

        let bytes = match fs::read(&full_path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!("No saved {} found at {}", key.name(), full_path.display());
                return Ok(None);
            }
            Err(e) => {
                let err = AppError::PersistenceRead {
                    key: key.name().to_string(),
                    reason: e.to_string(),
                };
                error!("{}", err);
                return Err(err);
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                error!(
                    "Saved {} is broken ({}): {}",
                    key.name(),
                    full_path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    /// Creates the base directory if needed. Failures are only logged; the
    /// following read or write reports its own error.
    fn ensure_directory(&self) -> bool {
        if self.base.is_dir() {
            return true;
        }
        match fs::create_dir_all(&self.base) {
            Ok(()) => true,
            Err(e) => {
                error!(
                    "Failed to create saves directory {}: {}",
                    self.base.display(),
                    e
                );
                false
            }
        }
    }
}

/// Persistence of the displayed path list, as needed by the gallery.
pub trait PathListRepository {
    fn save_paths(&self, paths: &[String]) -> Result<()>;
    fn load_paths(&self) -> Result<Option<Vec<String>>>;
}

impl PathListRepository for PathListStore {
    fn save_paths(&self, paths: &[String]) -> Result<()> {
        self.save(&CACHED_PATHS_LIST, &paths.to_vec())
    }

    fn load_paths(&self) -> Result<Option<Vec<String>>> {
        self.load(&CACHED_PATHS_LIST)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_save_then_load_preserves_order() {
        let dir = TempDir::new().unwrap();
        let store = PathListStore::in_data_root(dir.path());
        let list = paths(&["/z.png", "/a.jpg", "/m.jpeg"]);

        store.save(&CACHED_PATHS_LIST, &list).unwrap();

        assert_eq!(store.load(&CACHED_PATHS_LIST).unwrap(), Some(list));
    }

    #[test]
    fn test_empty_list_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = PathListStore::in_data_root(dir.path());

        store.save_paths(&[]).unwrap();

        assert_eq!(store.load_paths().unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_load_never_saved_key() {
        let dir = TempDir::new().unwrap();
        let store = PathListStore::in_data_root(dir.path());

        assert_eq!(store.load_paths().unwrap(), None);
        // The saves directory is created even by a read.
        assert!(dir.path().join(SAVES_DIR_NAME).is_dir());
    }

    #[test]
    fn test_file_location_and_format() {
        let dir = TempDir::new().unwrap();
        let store = PathListStore::in_data_root(dir.path());

        store.save_paths(&paths(&["/a.png", "/b.jpg"])).unwrap();

        let file = dir.path().join(".gamefiles").join("CACHED_PATHS_LIST.json");
        let contents = fs::read_to_string(file).unwrap();
        assert_eq!(contents, r#"["/a.png","/b.jpg"]"#);
    }

    #[test]
    fn test_overwrite_replaces_previous_list() {
        let dir = TempDir::new().unwrap();
        let store = PathListStore::new(dir.path());

        store.save_paths(&paths(&["/a.png", "/b.jpg"])).unwrap();
        store.save_paths(&paths(&["/b.jpg"])).unwrap();

        assert_eq!(store.load_paths().unwrap(), Some(paths(&["/b.jpg"])));
        assert!(!dir.path().join("CACHED_PATHS_LIST.json.tmp").exists());
    }

    #[test]
    fn test_malformed_file_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = PathListStore::new(dir.path());
        fs::write(store.file_path(&CACHED_PATHS_LIST), "{not json").unwrap();

        assert_eq!(store.load_paths().unwrap(), None);
    }

    #[test]
    fn test_unwritable_base_reports_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"file").unwrap();
        // The base is below a regular file, so it can never be created.
        let store = PathListStore::new(blocker.join("saves"));

        let err = store.save_paths(&paths(&["/a.png"])).unwrap_err();
        assert!(matches!(err, AppError::PersistenceWrite { .. }));
        assert!(err.is_user_visible());
    }
}
