//! Error types for document loading.
//!
//! Everything past loading is total: flattening, indexing, filtering,
//! ranking and path resolution return empty results instead of failing.

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("File not found at '{}'", path.display())]
    NotFound { path: PathBuf },

    #[error("Error reading '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Invalid JSON format in '{}': {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Error reading CSV file '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Unsupported file type '{extension}' for '{}' (expected .json or .csv)", path.display())]
    Unsupported { path: PathBuf, extension: String },
}

impl LoadError {
    /// True when the file itself is missing, as opposed to unreadable or unparsable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LoadError::NotFound { .. })
    }

    /// The file the load was attempted on
    pub fn path(&self) -> &Path {
        match self {
            LoadError::NotFound { path }
            | LoadError::Io { path, .. }
            | LoadError::Json { path, .. }
            | LoadError::Csv { path, .. }
            | LoadError::Unsupported { path, .. } => path,
        }
    }
}
