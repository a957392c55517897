use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, RwLock};

use docstore_model::EntityKind;
use tracing::info;

use crate::collection::Collection;
use crate::config::StoreConfig;
use crate::error::{StorageError, StorageResult};

/// Handle to a directory of collection files.
///
/// Each collection has a read/write lock: `save`/`remove`/`clear` hold it
/// exclusively for the whole read-modify-write, reads hold it shared. Within
/// one process no update is lost and no read sees a half-written file.
/// Other processes writing the same files are not coordinated with.
#[derive(Debug)]
pub struct Store {
    config: StoreConfig,
    locks: Mutex<HashMap<String, Arc<RwLock<()>>>>,
}

impl Store {
    /// Opens a store, creating the root directory if needed.
    pub fn open(config: StoreConfig) -> StorageResult<Self> {
        fs::create_dir_all(&config.root)?;
        info!(root = %config.root.display(), "Opened document store");
        Ok(Self {
            config,
            locks: Mutex::new(HashMap::new()),
        })
    }

    /// Opens a store at `root` with default settings.
    pub fn open_at(root: impl Into<PathBuf>) -> StorageResult<Self> {
        Self::open(StoreConfig::new(root))
    }

    #[must_use]
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        self.config.root()
    }

    /// Kind-level operations for `K`.
    #[must_use]
    pub fn collection<K: EntityKind>(&self) -> Collection<'_, K> {
        Collection::new(self)
    }

    /// Lock shared by every kind whose collection is named `name`.
    pub(crate) fn collection_lock(&self, name: &str) -> StorageResult<Arc<RwLock<()>>> {
        let mut locks = self
            .locks
            .lock()
            .map_err(|e| StorageError::LockPoisoned(e.to_string()))?;
        Ok(Arc::clone(locks.entry(name.to_string()).or_default()))
    }
}
