//! Error types for the rad-index crate.

use std::{io, path::PathBuf};

use thiserror::Error;

/// A dataset document could not be turned into an index.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// Failed to read the dataset file.
    #[error("failed to read dataset {path}: {source}")]
    Read {
        /// Path to the dataset file.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },

    /// The document is not valid JSON.
    #[error("dataset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The document root is not a JSON object.
    #[error("dataset root must be an object")]
    NotAnObject,

    /// The document has no `annexes` field.
    #[error("dataset has no `annexes` field")]
    MissingAnnexes,

    /// The `annexes` field is not an object keyed by category.
    #[error("dataset `annexes` must be an object keyed by category")]
    AnnexesNotObject,

    /// The `metadata` field could not be read.
    #[error("invalid dataset metadata: {0}")]
    InvalidMetadata(serde_json::Error),

    /// An element of a category could not be read as an entry.
    #[error("invalid entry {position} in category {category}: {source}")]
    InvalidEntry {
        /// Category the element belongs to.
        category: String,
        /// Zero-based position within the category.
        position: usize,
        /// Underlying deserialization error.
        source: serde_json::Error,
    },

    /// No entries were found in any category.
    #[error("dataset contains no entries")]
    Empty,
}

/// Errors surfaced by the search engine handle.
#[derive(Debug, Error)]
pub enum IndexError {
    /// A query was issued before any dataset was loaded.
    #[error("search index is not ready: no dataset has been loaded")]
    NotReady,

    /// Loading a dataset failed.
    #[error(transparent)]
    Dataset(#[from] DatasetError),
}
