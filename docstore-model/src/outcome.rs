use std::fmt;

use docstore_types::EntityId;

use crate::entity::Entity;

/// Result of persisting an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The entity was unsaved and got this id.
    Created(EntityId),
    /// The stored snapshot with this id was replaced.
    Updated(EntityId),
    /// No stored snapshot carries this id; nothing was written for it.
    NotFound(EntityId),
}

impl SaveOutcome {
    #[must_use]
    pub fn id(self) -> EntityId {
        match self {
            Self::Created(id) | Self::Updated(id) | Self::NotFound(id) => id,
        }
    }

    /// True when the save had no effect on the collection.
    #[must_use]
    pub fn is_noop(self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result of removing an entity by id.
pub enum RemoveOutcome<K> {
    /// The snapshot that was dropped from the collection.
    Removed(Entity<K>),
    /// No snapshot carried the id.
    NotFound(EntityId),
}

impl<K> RemoveOutcome<K> {
    #[must_use]
    pub fn is_removed(&self) -> bool {
        matches!(self, Self::Removed(_))
    }

    /// The removed entity, if any.
    #[must_use]
    pub fn into_removed(self) -> Option<Entity<K>> {
        match self {
            Self::Removed(entity) => Some(entity),
            Self::NotFound(_) => None,
        }
    }
}

impl<K> Clone for RemoveOutcome<K> {
    fn clone(&self) -> Self {
        match self {
            Self::Removed(entity) => Self::Removed(entity.clone()),
            Self::NotFound(id) => Self::NotFound(*id),
        }
    }
}

impl<K> PartialEq for RemoveOutcome<K> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Removed(a), Self::Removed(b)) => a == b,
            (Self::NotFound(a), Self::NotFound(b)) => a == b,
            _ => false,
        }
    }
}

impl<K> fmt::Debug for RemoveOutcome<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Removed(entity) => f.debug_tuple("Removed").field(entity).finish(),
            Self::NotFound(id) => f.debug_tuple("NotFound").field(id).finish(),
        }
    }
}
