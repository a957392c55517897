use std::fmt;
use std::marker::PhantomData;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use docstore_model::{Entity, EntityId, EntityKind, Query, RemoveOutcome, SaveOutcome};
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{StorageError, StorageResult};
use crate::file;
use crate::store::Store;

/// Kind-level persistence operations, shared by every [`EntityKind`].
///
/// Every call reads the whole collection file; writes rewrite it in full.
pub struct Collection<'a, K> {
    store: &'a Store,
    kind: PhantomData<fn() -> K>,
}

impl<'a, K: EntityKind> Collection<'a, K> {
    pub(crate) fn new(store: &'a Store) -> Self {
        Self {
            store,
            kind: PhantomData,
        }
    }

    /// File backing this kind: `<root>/<lowercased name>.<extension>`.
    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        self.store.config().path_for(&K::collection_name())
    }

    /// Every stored entity, in file order.
    ///
    /// Reads share the collection lock, so they never observe a write in progress.
    pub fn all(&self) -> StorageResult<Vec<Entity<K>>> {
        let path = self.db_path();
        let lock = self.lock()?;
        if !path.exists() {
            let _guard = lock.write().map_err(poisoned)?;
            file::ensure_exists(&path)?;
        }
        let _guard = lock.read().map_err(poisoned)?;
        file::load(&path)
    }

    /// Number of stored entities.
    pub fn count(&self) -> StorageResult<usize> {
        Ok(self.all()?.len())
    }

    /// Builds an entity from `fields` and saves it, returning it with its id.
    pub fn create(&self, fields: Map<String, Value>) -> StorageResult<Entity<K>> {
        let mut entity = Entity::new(fields);
        self.save(&mut entity)?;
        Ok(entity)
    }

    /// Like [`Collection::create`] for any value serializing to a JSON object.
    pub fn create_from<T: Serialize>(&self, value: &T) -> StorageResult<Entity<K>> {
        let mut entity = Entity::from_serializable(value)?;
        self.save(&mut entity)?;
        Ok(entity)
    }

    /// Entities whose fields contain every entry of `query`, in file order.
    ///
    /// Accepts a [`Query`], a `(key, value)` pair, a field map or an id.
    pub fn find(&self, query: impl Into<Query>) -> StorageResult<Vec<Entity<K>>> {
        let query = query.into();
        let mode = self.store.config().match_mode;
        Ok(self
            .all()?
            .into_iter()
            .filter(|entity| entity.matches(&query, mode))
            .collect())
    }

    /// First entity matching `query`, if any.
    pub fn find_one(&self, query: impl Into<Query>) -> StorageResult<Option<Entity<K>>> {
        Ok(self.find(query)?.into_iter().next())
    }

    /// Entity with the given id, if stored.
    pub fn get(&self, id: EntityId) -> StorageResult<Option<Entity<K>>> {
        self.find_one(Query::by_id(id))
    }

    /// Inserts an unsaved entity or replaces the stored snapshot with its id.
    ///
    /// An unsaved entity gets its id only once the file has been written.
    /// The collection is rewritten even when nothing matched. Fails with
    /// [`StorageError::IdExhausted`], leaving the file untouched, when no
    /// fresh id is left.
    pub fn save(&self, entity: &mut Entity<K>) -> StorageResult<SaveOutcome> {
        let path = self.db_path();
        let config = self.store.config();
        let lock = self.lock()?;
        let _guard = lock.write().map_err(poisoned)?;

        let mut stored: Vec<Entity<K>> = file::load(&path)?;
        let outcome = match entity.id() {
            None => {
                let id = config
                    .id_strategy
                    .next_id(stored.iter().filter_map(Entity::id))
                    .ok_or(StorageError::IdExhausted(K::NAME))?;
                let mut snapshot = entity.clone();
                snapshot.assign_id(id);
                stored.push(snapshot);
                SaveOutcome::Created(id)
            }
            Some(id) => match stored.iter_mut().find(|e| e.id() == Some(id)) {
                Some(slot) => {
                    *slot = entity.clone();
                    SaveOutcome::Updated(id)
                }
                None => SaveOutcome::NotFound(id),
            },
        };
        file::save(&stored, &path, config.format, config.write_mode)?;

        match outcome {
            SaveOutcome::Created(id) => {
                entity.assign_id(id);
                debug!(kind = K::NAME, %id, "Created entity");
            }
            SaveOutcome::Updated(id) => debug!(kind = K::NAME, %id, "Updated entity"),
            SaveOutcome::NotFound(id) => {
                warn!(kind = K::NAME, %id, "Save matched no stored entity");
            }
        }
        Ok(outcome)
    }

    /// Drops the entity with `id`. The collection is rewritten either way.
    pub fn remove(&self, id: EntityId) -> StorageResult<RemoveOutcome<K>> {
        let path = self.db_path();
        let config = self.store.config();
        let lock = self.lock()?;
        let _guard = lock.write().map_err(poisoned)?;

        let mut stored: Vec<Entity<K>> = file::load(&path)?;
        let outcome = match stored.iter().position(|e| e.id() == Some(id)) {
            Some(index) => RemoveOutcome::Removed(stored.remove(index)),
            None => RemoveOutcome::NotFound(id),
        };
        file::save(&stored, &path, config.format, config.write_mode)?;

        if outcome.is_removed() {
            debug!(kind = K::NAME, %id, "Removed entity");
        } else {
            warn!(kind = K::NAME, %id, "Remove matched no stored entity");
        }
        Ok(outcome)
    }

    /// Empties the collection.
    pub fn clear(&self) -> StorageResult<()> {
        let path = self.db_path();
        let config = self.store.config();
        let lock = self.lock()?;
        let _guard = lock.write().map_err(poisoned)?;

        file::ensure_exists(&path)?;
        file::save::<Entity<K>>(&[], &path, config.format, config.write_mode)
    }

    fn lock(&self) -> StorageResult<Arc<RwLock<()>>> {
        self.store.collection_lock(&K::collection_name())
    }
}

fn poisoned<E: fmt::Display>(err: E) -> StorageError {
    StorageError::LockPoisoned(err.to_string())
}

impl<K> Clone for Collection<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Collection<'_, K> {}

impl<K: EntityKind> fmt::Debug for Collection<'_, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("kind", &K::NAME)
            .field("path", &self.db_path())
            .finish()
    }
}

/// Instance-level persistence for entities.
pub trait Persist {
    /// Upserts this entity into its kind's collection in `store`.
    fn save(&mut self, store: &Store) -> StorageResult<SaveOutcome>;
}

impl<K: EntityKind> Persist for Entity<K> {
    fn save(&mut self, store: &Store) -> StorageResult<SaveOutcome> {
        store.collection::<K>().save(self)
    }
}
