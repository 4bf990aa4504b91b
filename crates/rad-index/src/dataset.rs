//! Dataset documents: entries grouped by category plus publication metadata.
//!
//! The document layout is the one produced by the RAD spreadsheet converter:
//!
//! ```json
//! {
//!   "metadata": { "cycle": "2511", "version": "1.17" },
//!   "annexes": {
//!     "annex2b_rules": [ { "id": "LSLF1139C", "annex": "2B" } ],
//!     "annex3b_dct": [ ... ]
//!   }
//! }
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{DatasetError, Entry};

/// Publication metadata for a dataset.
///
/// Known fields are read as text whatever their JSON type, so a numeric cycle or version
/// loads the same as a quoted one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Metadata {
    /// AIRAC cycle, e.g. `2511`.
    #[serde(
        default,
        deserialize_with = "loose_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub cycle: Option<String>,
    /// Document version, e.g. `1.17`.
    #[serde(
        default,
        deserialize_with = "loose_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub version: Option<String>,
    /// Source file the dataset was converted from.
    #[serde(
        default,
        deserialize_with = "loose_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub filename: Option<String>,
    /// Conversion timestamp.
    #[serde(
        default,
        deserialize_with = "loose_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub parsed_at: Option<String>,
    /// Any other provenance fields, kept as loaded.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Reads a metadata value as trimmed text, `None` when null or blank.
fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let rendered = match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    };
    let trimmed = rendered.trim();
    Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
}

/// A named group of entries, e.g. `annex2b_rules`.
#[derive(Debug, Clone, PartialEq)]
pub struct Category {
    /// Category key as it appears in the document.
    pub name: String,
    /// Entries in document order.
    pub entries: Vec<Entry>,
}

/// A complete dataset snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// Publication metadata.
    metadata: Metadata,
    /// Categories in document order.
    categories: Vec<Category>,
}

impl Dataset {
    /// Creates a dataset from already-parsed parts.
    pub fn new(metadata: Metadata, categories: Vec<Category>) -> Self {
        Self {
            metadata,
            categories,
        }
    }

    /// Reads and parses a dataset document from disk.
    pub fn from_path(path: &Path) -> Result<Self, DatasetError> {
        let contents = fs::read_to_string(path).map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&contents)
    }

    /// Parses a dataset document from JSON text.
    pub fn from_json_str(json: &str) -> Result<Self, DatasetError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Builds a dataset from a parsed JSON document.
    ///
    /// Categories whose value is not an array are skipped, as are rows without an
    /// identifier. Any other element that cannot be read as an entry is an error.
    pub fn from_value(value: Value) -> Result<Self, DatasetError> {
        let Value::Object(mut root) = value else {
            return Err(DatasetError::NotAnObject);
        };

        let metadata = match root.remove("metadata") {
            Some(raw @ Value::Object(_)) => {
                serde_json::from_value(raw).map_err(DatasetError::InvalidMetadata)?
            }
            Some(Value::Null) | None => Metadata::default(),
            Some(_) => {
                debug!("ignoring metadata that is not an object");
                Metadata::default()
            }
        };

        let annexes = match root.remove("annexes") {
            None => return Err(DatasetError::MissingAnnexes),
            Some(Value::Object(annexes)) => annexes,
            Some(_) => return Err(DatasetError::AnnexesNotObject),
        };

        let mut categories = Vec::with_capacity(annexes.len());
        for (name, section) in annexes {
            let Value::Array(items) = section else {
                debug!(category = %name, "skipping non-array category");
                continue;
            };
            let mut entries = Vec::with_capacity(items.len());
            for (position, item) in items.into_iter().enumerate() {
                if !has_identifier(&item) {
                    debug!(category = %name, position, "skipping row without identifier");
                    continue;
                }
                let entry = serde_json::from_value(item).map_err(|source| {
                    DatasetError::InvalidEntry {
                        category: name.clone(),
                        position,
                        source,
                    }
                })?;
                entries.push(entry);
            }
            categories.push(Category { name, entries });
        }

        Ok(Self {
            metadata,
            categories,
        })
    }

    /// Publication metadata.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Categories in document order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Total number of entries across all categories.
    pub fn entry_count(&self) -> usize {
        self.categories.iter().map(|c| c.entries.len()).sum()
    }

    /// Splits the dataset into metadata and categories.
    pub(crate) fn into_parts(self) -> (Metadata, Vec<Category>) {
        (self.metadata, self.categories)
    }
}

/// Whether a category element is an object carrying a non-blank `id`.
///
/// Non-objects report `true` so that they surface as [`DatasetError::InvalidEntry`].
fn has_identifier(item: &Value) -> bool {
    let Value::Object(fields) = item else {
        return true;
    };
    match fields.get("id") {
        None | Some(Value::Null) => false,
        Some(Value::String(id)) => !id.trim().is_empty(),
        Some(_) => true,
    }
}
