//! Shared test helpers for storage tests.

#![allow(dead_code)]

use docstore_storage::{EntityKind, Store, StoreConfig};
use serde_json::{Map, Value};
use tempfile::TempDir;

pub struct User;
impl EntityKind for User {
    const NAME: &'static str = "User";
}

pub struct Post;
impl EntityKind for Post {
    const NAME: &'static str = "Post";
}

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("docstore_storage=debug")
        .with_test_writer()
        .try_init();
}

/// Unwraps a `json!` object literal into a field map.
pub fn fields(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}

/// A store rooted in a fresh temp directory. Keep the `TempDir` alive.
pub fn temp_store() -> (TempDir, Store) {
    temp_store_with(|config| config)
}

pub fn temp_store_with(configure: impl FnOnce(StoreConfig) -> StoreConfig) -> (TempDir, Store) {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let config = configure(StoreConfig::new(dir.path().join("db")));
    let store = Store::open(config).unwrap();
    (dir, store)
}
