use std::fmt;
use std::marker::PhantomData;

use docstore_types::EntityId;
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ModelError, ModelResult, json_type_name};
use crate::query::{MatchMode, Query};

/// Name of the reserved identifier member in every stored snapshot.
pub const ID_FIELD: &str = "id";

/// A record of kind `K`: an open field mapping plus the id assigned on first save.
///
/// The `id` member is kept apart from the other fields, so `fields()` never
/// contains it. Serialized form is a single JSON object with `id` written
/// first (omitted while the entity is unsaved).
pub struct Entity<K> {
    id: Option<EntityId>,
    fields: Map<String, Value>,
    kind: PhantomData<fn() -> K>,
}

impl<K> Entity<K> {
    /// Builds an unsaved entity. Any `id` member in `fields` is dropped.
    #[must_use]
    pub fn new(mut fields: Map<String, Value>) -> Self {
        fields.remove(ID_FIELD);
        Self {
            id: None,
            fields,
            kind: PhantomData,
        }
    }

    /// Builds an unsaved entity from a JSON object.
    pub fn from_value(value: Value) -> ModelResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self::new(fields)),
            other => Err(ModelError::NotAnObject(json_type_name(&other))),
        }
    }

    /// Builds an unsaved entity from any type that serializes to a JSON object.
    pub fn from_serializable<T: Serialize>(value: &T) -> ModelResult<Self> {
        Self::from_value(serde_json::to_value(value)?)
    }

    /// Rebuilds an entity from a stored snapshot, keeping its `id`.
    pub fn from_snapshot(snapshot: Value) -> ModelResult<Self> {
        if !snapshot.is_object() {
            return Err(ModelError::NotAnObject(json_type_name(&snapshot)));
        }
        Ok(serde_json::from_value(snapshot)?)
    }

    /// The assigned id, or `None` while unsaved.
    #[must_use]
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    /// Whether an id has been assigned.
    #[must_use]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Sets the id. Called by the storage layer on first save.
    pub fn assign_id(&mut self, id: EntityId) {
        self.id = Some(id);
    }

    /// The entity's own fields, without `id`.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// Consumes the entity, returning its fields without `id`.
    #[must_use]
    pub fn into_fields(self) -> Map<String, Value> {
        self.fields
    }

    /// Returns a field value. `id` is not a field; use [`Entity::id`].
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Sets a field, returning the previous value.
    ///
    /// The `id` key is reserved and left untouched.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let key = key.into();
        if key == ID_FIELD {
            return None;
        }
        self.fields.insert(key, value.into())
    }

    /// Removes a field, returning its value.
    pub fn remove_field(&mut self, key: &str) -> Option<Value> {
        self.fields.remove(key)
    }

    /// Resolves a JSON pointer (e.g. `"/profile/name"`) against the fields.
    #[must_use]
    pub fn pointer(&self, pointer: &str) -> Option<&Value> {
        let rest = pointer.strip_prefix('/')?;
        let (head, tail) = match rest.split_once('/') {
            Some((head, tail)) => (head, Some(tail)),
            None => (rest, None),
        };
        let head = head.replace("~1", "/").replace("~0", "~");
        let value = self.fields.get(&head)?;
        match tail {
            Some(tail) => value.pointer(&format!("/{tail}")),
            None => Some(value),
        }
    }

    /// Extract a string value using a JSON pointer.
    pub fn get_str(&self, pointer: &str) -> Option<&str> {
        self.pointer(pointer).and_then(|v| v.as_str())
    }

    /// Extract a boolean value using a JSON pointer.
    pub fn get_bool(&self, pointer: &str) -> Option<bool> {
        self.pointer(pointer).and_then(|v| v.as_bool())
    }

    /// Extract a numeric value using a JSON pointer.
    pub fn get_number(&self, pointer: &str) -> Option<f64> {
        self.pointer(pointer).and_then(|v| v.as_f64())
    }

    /// Full snapshot as a JSON object, `id` included when set.
    #[must_use]
    pub fn snapshot(&self) -> Value {
        let mut object = self.fields.clone();
        if let Some(id) = self.id {
            object.insert(ID_FIELD.to_string(), id.into());
        }
        Value::Object(object)
    }

    /// Deserializes the snapshot into a typed view of this kind.
    pub fn to_typed<T: DeserializeOwned>(&self) -> ModelResult<T> {
        Ok(serde_json::from_value(self.snapshot())?)
    }

    /// True when every key of `query` is present on this entity with an
    /// equal value under `mode`. The empty query matches everything.
    #[must_use]
    pub fn matches(&self, query: &Query, mode: MatchMode) -> bool {
        query.iter().all(|(key, expected)| {
            if key == ID_FIELD {
                let id = self.id.map(Value::from);
                mode.accepts(id.as_ref(), expected)
            } else {
                mode.accepts(self.fields.get(key), expected)
            }
        })
    }
}

impl<K> Default for Entity<K> {
    fn default() -> Self {
        Self::new(Map::new())
    }
}

impl<K> Clone for Entity<K> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            fields: self.fields.clone(),
            kind: PhantomData,
        }
    }
}

impl<K> PartialEq for Entity<K> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id && self.fields == other.fields
    }
}

impl<K> fmt::Debug for Entity<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("fields", &self.fields)
            .finish()
    }
}

/// Pretty-printed JSON of the snapshot, for diagnostics.
impl<K> fmt::Display for Entity<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = serde_json::to_string_pretty(self).map_err(|_| fmt::Error)?;
        f.write_str(&s)
    }
}

impl<K> From<Map<String, Value>> for Entity<K> {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}

impl<K> Serialize for Entity<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.fields.len() + usize::from(self.id.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(id) = self.id {
            map.serialize_entry(ID_FIELD, &id)?;
        }
        for (key, value) in &self.fields {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, K> Deserialize<'de> for Entity<K> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::<String, Value>::deserialize(deserializer)?;
        let id = match fields.remove(ID_FIELD) {
            Some(raw) => Some(EntityId::deserialize(raw).map_err(de::Error::custom)?),
            None => None,
        };
        Ok(Self {
            id,
            fields,
            kind: PhantomData,
        })
    }
}
