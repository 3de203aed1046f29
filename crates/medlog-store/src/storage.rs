//! Whole-file JSON array storage for one list

use crate::io::{read_json_array, write_json_array};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// A single JSON array file holding one list.
///
/// Every save replaces the whole file. Loading never fails: a missing,
/// unreadable or malformed file loads as an empty list.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn load<T: for<'de> Deserialize<'de>>(&self) -> Vec<T> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "data file not found, starting empty");
            return Vec::new();
        }

        match read_json_array(&self.path) {
            Ok(records) => {
                info!(path = %self.path.display(), count = records.len(), "loaded data file");
                records
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "failed to load data file");
                Vec::new()
            }
        }
    }

    /// Returns false when the data may not have reached disk
    pub fn save<T: Serialize>(&self, records: &[T]) -> bool {
        match write_json_array(&self.path, records) {
            Ok(()) => {
                info!(path = %self.path.display(), count = records.len(), "saved data file");
                true
            }
            Err(e) => {
                error!(path = %self.path.display(), error = %e, "failed to save data file");
                false
            }
        }
    }

    /// Truncate to an empty array; the file itself is kept
    pub fn clear(&self) -> bool {
        warn!(path = %self.path.display(), "clearing data file");
        self.save::<serde_json::Value>(&[])
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}
