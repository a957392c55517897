//! Store configuration.

use std::path::{Path, PathBuf};

use docstore_model::MatchMode;
use docstore_types::IdStrategy;
use serde::{Deserialize, Serialize};

/// Directory used when no root is configured.
pub const DEFAULT_ROOT: &str = "db";

/// File extension of collection files.
pub const DEFAULT_EXTENSION: &str = "txt";

/// How collections are rendered on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JsonFormat {
    /// Two-space indented JSON.
    #[default]
    Pretty,
    Compact,
}

impl JsonFormat {
    pub fn render<T: Serialize + ?Sized>(self, value: &T) -> serde_json::Result<String> {
        match self {
            Self::Pretty => serde_json::to_string_pretty(value),
            Self::Compact => serde_json::to_string(value),
        }
    }
}

/// How a collection file is replaced on write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Truncate and write in place. A crash mid-write can leave a corrupt file.
    #[default]
    Overwrite,
    /// Write a sibling temp file, then rename it over the target.
    Atomic,
}

/// Settings for a [`Store`](crate::Store).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one file per entity kind.
    pub root: PathBuf,
    /// Extension of collection files, without the dot.
    pub extension: String,
    pub format: JsonFormat,
    pub write_mode: WriteMode,
    pub id_strategy: IdStrategy,
    pub match_mode: MatchMode,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(DEFAULT_ROOT),
            extension: DEFAULT_EXTENSION.to_string(),
            format: JsonFormat::default(),
            write_mode: WriteMode::default(),
            id_strategy: IdStrategy::default(),
            match_mode: MatchMode::default(),
        }
    }
}

impl StoreConfig {
    /// Default settings rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: JsonFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_write_mode(mut self, write_mode: WriteMode) -> Self {
        self.write_mode = write_mode;
        self
    }

    #[must_use]
    pub fn with_id_strategy(mut self, id_strategy: IdStrategy) -> Self {
        self.id_strategy = id_strategy;
        self
    }

    #[must_use]
    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    /// Path of the collection file named `stem`.
    #[must_use]
    pub fn path_for(&self, stem: &str) -> PathBuf {
        let file_name = if self.extension.is_empty() {
            stem.to_string()
        } else {
            format!("{stem}.{}", self.extension)
        };
        self.root.join(file_name)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}
