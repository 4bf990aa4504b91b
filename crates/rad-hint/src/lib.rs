//! Error message hint extraction for rad.
//!
//! Flight plan validators reject routes with free-form messages such as:
//!
//! ```text
//! RS: TRAFFIC VIA OMASI IS ON FORBIDDEN ROUTE REF:[LSLF1139C] ANNEX 2B
//! ```
//!
//! This crate pulls the pieces a lookup can use out of such text: the reference code of
//! the offending rule, the annex it lives in, the five-letter point codes mentioned, and a
//! coarse error category. Extraction is heuristic. Text that follows none of the usual
//! conventions produces an empty [`Hint`] rather than an error.
//!
//! # Example
//!
//! ```
//! use rad_hint::{ErrorCategory, parse};
//!
//! let hint = parse("RS: TRAFFIC VIA OMASI IS ON FORBIDDEN ROUTE REF:[LSLF1139C] ANNEX 2B");
//! assert_eq!(hint.reference_code.as_deref(), Some("LSLF1139C"));
//! assert_eq!(hint.annex.as_deref(), Some("2B"));
//! assert!(hint.points.contains("OMASI"));
//! assert_eq!(hint.category, Some(ErrorCategory::Forbidden));
//! ```

#![warn(missing_docs)]

mod category;
mod extract;

pub use category::ErrorCategory;
pub use extract::{POINT_STOPLIST, parse};

use std::collections::BTreeSet;

use serde::Serialize;

/// Structured hints extracted from an error message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Hint {
    /// Reference code of the rule named by the message (`REF:[...]`).
    pub reference_code: Option<String>,
    /// Annex named by the message, e.g. `2B`.
    pub annex: Option<String>,
    /// Five-letter point or beacon codes mentioned in the message.
    pub points: BTreeSet<String>,
    /// Coarse error category.
    pub category: Option<ErrorCategory>,
}

impl Hint {
    /// Returns true if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.reference_code.is_none()
            && self.annex.is_none()
            && self.points.is_empty()
            && self.category.is_none()
    }

    /// Joins the extracted points into a single query string.
    ///
    /// Returns `None` when no points were found.
    pub fn points_query(&self) -> Option<String> {
        if self.points.is_empty() {
            return None;
        }
        Some(self.points.iter().cloned().collect::<Vec<_>>().join(" "))
    }
}
