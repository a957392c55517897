//! JSON file storage layer for docstore.
//!
//! Gives record-like entities basic persistence: create, load-all, filtered
//! find, update-by-id and delete-by-id. Each entity kind owns one file
//! holding a JSON array of snapshots.
//!
//! # Architecture
//!
//! - [`file`] is the storage adapter: ensure a file exists, read it whole,
//!   write it whole
//! - [`Collection`] is the generic base behaviour every kind shares
//! - [`Store`] owns the configuration and the per-collection write locks
//!
//! ```no_run
//! use docstore_storage::{EntityKind, Query, Store};
//! use serde_json::json;
//!
//! struct User;
//! impl EntityKind for User {
//!     const NAME: &'static str = "User";
//! }
//!
//! # fn main() -> docstore_storage::StorageResult<()> {
//! let store = Store::open_at("db")?;
//! let users = store.collection::<User>();
//! let fields = json!({"username": "gua", "password": "123"});
//! let created = users.create(fields.as_object().cloned().unwrap_or_default())?;
//! let found = users.find(Query::new().field("username", "gua"))?;
//! assert_eq!(found[0].id(), created.id());
//! # Ok(())
//! # }
//! ```

mod collection;
mod config;
mod error;
pub mod file;
mod store;

pub use collection::{Collection, Persist};
pub use config::{DEFAULT_EXTENSION, DEFAULT_ROOT, JsonFormat, StoreConfig, WriteMode};
pub use docstore_model::{
    Entity, EntityId, EntityKind, IdStrategy, MatchMode, Query, RemoveOutcome, SaveOutcome,
};
pub use error::{StorageError, StorageResult};
pub use store::Store;
