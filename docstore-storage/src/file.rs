//! Whole-file collection I/O.
//!
//! A collection file holds exactly one JSON array. Every load reads the
//! entire file and every save rewrites it; there is no partial access.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use crate::config::{JsonFormat, WriteMode};
use crate::error::StorageResult;

/// Content written to a collection file that does not exist yet.
pub const EMPTY_COLLECTION: &str = "[]";

/// Creates `path` holding an empty array if nothing exists there.
///
/// Missing parent directories are created as well. An existing file is never
/// opened for writing, even if it appears between the check and the create.
pub fn ensure_exists(path: &Path) -> StorageResult<()> {
    if path.exists() {
        return Ok(());
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(mut file) => {
            file.write_all(EMPTY_COLLECTION.as_bytes())?;
            info!(path = %path.display(), "Created empty collection file");
            Ok(())
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => Ok(()),
        Err(err) => Err(err.into()),
    }
}

/// Reads and parses the whole collection at `path`, creating it if missing.
///
/// Malformed content is returned as an error; the file is left untouched.
pub fn load<T: DeserializeOwned>(path: &Path) -> StorageResult<Vec<T>> {
    ensure_exists(path)?;
    let text = fs::read_to_string(path)?;
    let items: Vec<T> = serde_json::from_str(&text)?;
    debug!(path = %path.display(), count = items.len(), "Loaded collection");
    Ok(items)
}

/// Serializes `items` and replaces the file at `path` in full.
pub fn save<T: Serialize>(
    items: &[T],
    path: &Path,
    format: JsonFormat,
    write_mode: WriteMode,
) -> StorageResult<()> {
    let text = format.render(items)?;
    match write_mode {
        WriteMode::Overwrite => fs::write(path, text)?,
        WriteMode::Atomic => {
            let tmp_path = temp_path(path);
            fs::write(&tmp_path, text)?;
            fs::rename(&tmp_path, path)?;
        }
    }
    debug!(path = %path.display(), count = items.len(), ?write_mode, "Wrote collection");
    Ok(())
}

/// Sibling path used for atomic replacement, e.g. `user.txt.tmp`.
pub fn temp_path(path: &Path) -> PathBuf {
    path.with_extension(
        path.extension()
            .map(|ext| format!("{}.tmp", ext.to_string_lossy()))
            .unwrap_or_else(|| "tmp".to_string()),
    )
}
