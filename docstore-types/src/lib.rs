//! Core type definitions for docstore.
//!
//! This crate defines the small, kind-agnostic types shared by the model
//! and storage layers:
//! - Integer entity identifiers
//! - The rule used to pick the next identifier for a collection
//!
//! Field shapes belong to the concrete entity kinds, not here.

mod ids;

pub use ids::{EntityId, IdStrategy};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in type operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid entity id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),
}
