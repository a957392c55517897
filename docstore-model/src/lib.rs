//! Core entity model for docstore.
//!
//! Defines the kind-agnostic types the storage layer operates on:
//! - [`Entity`] — an open JSON field mapping plus an optional integer id
//! - [`EntityKind`] — names a concrete record type and its collection
//! - [`Query`] / [`MatchMode`] — partial-match filters over entity fields
//! - [`SaveOutcome`] / [`RemoveOutcome`] — what a write actually did
//!
//! Nothing in this crate touches the filesystem.

mod entity;
mod error;
mod kind;
mod outcome;
mod query;

pub use docstore_types::{EntityId, IdStrategy};
pub use entity::{Entity, ID_FIELD};
pub use error::{ModelError, ModelResult};
pub use kind::EntityKind;
pub use outcome::{RemoveOutcome, SaveOutcome};
pub use query::{MatchMode, Query};
