//! Persisted filter store.
//!
//! Each filter scope gets one JSON slot named `restoam-<key>.json` under an
//! injected directory. Reads fall back to defaults and writes are
//! best-effort: storage problems are logged and absorbed, never returned to
//! the caller. Access is cooperative with no locking — concurrent writers
//! race and the last write wins.

use crate::error::StorageError;
use crate::filters::FilterSet;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Namespace prefix for slot file names.
pub const SLOT_PREFIX: &str = "restoam";

/// Durable home for filter state, keyed by filter scope.
pub trait FilterStore {
    /// Read the slot for `key`, returning `defaults` when the slot is absent
    /// or unreadable.
    fn load(&self, key: &str, defaults: &FilterSet) -> FilterSet;

    /// Write `filters` to the slot for `key`. Failures are absorbed.
    fn save(&self, key: &str, filters: &FilterSet);

    /// Reset the slot for `key` to `defaults` and return them.
    fn clear(&self, key: &str, defaults: &FilterSet) -> FilterSet {
        self.save(key, defaults);
        defaults.clone()
    }
}

/// File-backed store: one `restoam-<key>.json` per filter scope.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the slot file for a filter scope key.
    #[must_use]
    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{SLOT_PREFIX}-{key}.json"))
    }

    fn try_load(path: &Path) -> Result<FilterSet, StorageError> {
        let slot = path.display().to_string();
        let raw = fs::read_to_string(path).map_err(|source| StorageError::Io {
            slot: slot.clone(),
            source,
        })?;
        serde_json::from_str(&raw).map_err(|source| StorageError::Corrupt { slot, source })
    }

    fn try_save(&self, path: &Path, filters: &FilterSet) -> Result<(), StorageError> {
        let slot = path.display().to_string();
        fs::create_dir_all(&self.dir).map_err(|source| StorageError::Io {
            slot: slot.clone(),
            source,
        })?;
        let raw = serde_json::to_string(filters).map_err(|source| StorageError::Corrupt {
            slot: slot.clone(),
            source,
        })?;
        fs::write(path, raw).map_err(|source| StorageError::Io { slot, source })
    }
}

impl FilterStore for FileStore {
    fn load(&self, key: &str, defaults: &FilterSet) -> FilterSet {
        let path = self.slot_path(key);
        if !path.exists() {
            return defaults.clone();
        }
        match Self::try_load(&path) {
            Ok(filters) => filters,
            Err(err) => {
                tracing::warn!("failed to load saved filters, using defaults: {err}");
                defaults.clone()
            }
        }
    }

    fn save(&self, key: &str, filters: &FilterSet) {
        let path = self.slot_path(key);
        if let Err(err) = self.try_save(&path, filters) {
            tracing::warn!("failed to save filters: {err}");
        }
    }
}

/// In-memory store used by tests and by one-shot runs that must not touch
/// the durable slot.
#[derive(Debug, Default)]
pub struct MemoryStore {
    // Slots hold serialized JSON so the round trip matches the file store.
    slots: RefCell<HashMap<String, String>>,
}

impl FilterStore for MemoryStore {
    fn load(&self, key: &str, defaults: &FilterSet) -> FilterSet {
        self.slots
            .borrow()
            .get(key)
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_else(|| defaults.clone())
    }

    fn save(&self, key: &str, filters: &FilterSet) {
        if let Ok(raw) = serde_json::to_string(filters) {
            self.slots.borrow_mut().insert(key.to_string(), raw);
        }
    }
}
