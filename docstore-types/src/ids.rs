//! Identifier types used throughout the docstore core.
//!
//! Ids are positive integers assigned on first save. `1` is the first id
//! handed out for an empty collection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a persisted entity, unique within its collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    /// The id given to the first entity of an empty collection.
    pub const FIRST: Self = Self(1);

    /// Wraps a raw integer id.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id directly after this one, or `None` once `u64::MAX` is reached.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
    }

    /// Parses an entity id from its decimal form.
    pub fn parse(s: &str) -> crate::Result<Self> {
        Ok(Self(s.trim().parse()?))
    }
}

impl From<u64> for EntityId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl From<EntityId> for u64 {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl From<EntityId> for serde_json::Value {
    fn from(id: EntityId) -> Self {
        serde_json::Value::from(id.0)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EntityId {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// How the next id of a collection is derived from the ids already stored.
///
/// `LastPlusOne` looks only at the final element, so it relies on the
/// collection staying in creation order. `MaxPlusOne` scans every element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    #[default]
    LastPlusOne,
    MaxPlusOne,
}

impl IdStrategy {
    /// Picks the id for a new entity given the stored ids in file order.
    ///
    /// An empty collection always yields [`EntityId::FIRST`]. Returns `None`
    /// when the basis id is `u64::MAX` and no larger id exists.
    #[must_use]
    pub fn next_id<I>(self, stored: I) -> Option<EntityId>
    where
        I: IntoIterator<Item = EntityId>,
    {
        let basis = match self {
            Self::LastPlusOne => stored.into_iter().last(),
            Self::MaxPlusOne => stored.into_iter().max(),
        };
        match basis {
            Some(id) => id.next(),
            None => Some(EntityId::FIRST),
        }
    }
}
