//! In-memory search index and query resolver for RAD entries.
//!
//! This crate turns a RAD dataset document into an immutable index and answers the
//! lookups an operator needs when a flight plan is rejected:
//! - Exact identifier and reference code lookup
//! - Weighted approximate search with annex, jurisdiction and status filters
//! - Error message lookup driven by hints from [`rad_hint`]
//! - Suggestions, per-annex listings and aggregate statistics
//!
//! A [`Resolver`] is built once per dataset and never changes. [`SearchEngine`] holds
//! the current one and swaps in a fresh resolver when a new dataset loads.
//!
//! # Example
//!
//! ```
//! use rad_index::{Dataset, SearchOptions, build_index};
//!
//! let dataset = Dataset::from_json_str(
//!     r#"{ "annexes": { "annex2b_rules": [
//!         { "id": "LSLF1139C", "annex": "2B", "point_or_airspace": "OMASI" }
//!     ] } }"#,
//! )
//! .unwrap();
//! let resolver = build_index(dataset).unwrap();
//!
//! assert_eq!(resolver.search_by_reference("[LSLF1139C]").len(), 1);
//! let results = resolver.search("omasi", &SearchOptions::new().annex("2B"));
//! assert_eq!(results[0].entry.id, "LSLF1139C");
//! ```

#![warn(missing_docs)]

mod dataset;
mod engine;
mod entry;
mod error;
mod field;
mod index;
pub mod matcher;
mod resolver;
mod stats;
mod types;

pub use dataset::{Category, Dataset, Metadata};
pub use engine::SearchEngine;
pub use entry::{ChangeStatus, Entry};
pub use error::{DatasetError, IndexError};
pub use field::SearchField;
pub use index::EntryIndex;
pub use rad_hint::{ErrorCategory, Hint, parse as parse_error};
pub use resolver::{
    ErrorLookup, LookupStrategy, MIN_QUERY_LEN, Resolver, SearchOptions, build_index,
};
pub use stats::{ACTIVE_STATUS, Stats, UNKNOWN_ANNEX};
pub use types::{ByteRange, FieldMatch, ScoredEntry, merge_ranges};
