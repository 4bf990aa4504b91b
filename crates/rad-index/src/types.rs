//! Data structures returned by search.

use std::ops::Range;

use serde::Serialize;

use crate::{Entry, SearchField};

/// A serializable byte range.
///
/// This is used in JSON output to represent match offsets within strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ByteRange {
    /// Byte offset into the source string.
    pub offset: usize,
    /// Length in bytes of the span.
    pub length: usize,
}

impl From<&Range<usize>> for ByteRange {
    fn from(range: &Range<usize>) -> Self {
        Self {
            offset: range.start,
            length: range.end.saturating_sub(range.start),
        }
    }
}

/// Serializes std byte ranges as [`ByteRange`] objects.
fn serialize_ranges<S>(ranges: &[Range<usize>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    let byte_ranges: Vec<ByteRange> = ranges.iter().map(ByteRange::from).collect();
    byte_ranges.serialize(serializer)
}

/// How a query matched one field of an entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    /// The matched field.
    pub field: SearchField,
    /// Normalized distance for this field: 0.0 is exact.
    pub score: f64,
    /// Byte ranges within the field text that matched, sorted and merged.
    ///
    /// Offsets index into [`Entry::field_text`] for this field.
    #[serde(serialize_with = "serialize_ranges")]
    pub ranges: Vec<Range<usize>>,
}

/// An entry returned by search together with its match information.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredEntry<'a> {
    /// The entry, borrowed from the index that produced it.
    pub entry: &'a Entry,
    /// Combined score: 0.0 is a perfect match, 1.0 no match.
    pub score: f64,
    /// Per-field match spans for highlighting.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub matches: Vec<FieldMatch>,
}

impl<'a> ScoredEntry<'a> {
    /// Wraps an exact lookup result: perfect score, no spans.
    pub fn exact(entry: &'a Entry) -> Self {
        Self {
            entry,
            score: 0.0,
            matches: Vec::new(),
        }
    }

    /// Match information for a field, if that field matched.
    pub fn field_match(&self, field: SearchField) -> Option<&FieldMatch> {
        self.matches.iter().find(|m| m.field == field)
    }
}

/// Merges ranges into a sorted list with overlapping or adjacent ranges combined.
pub fn merge_ranges(mut ranges: Vec<Range<usize>>) -> Vec<Range<usize>> {
    if ranges.is_empty() {
        return ranges;
    }

    ranges.sort_by_key(|r| r.start);

    let mut merged = Vec::with_capacity(ranges.len());
    let mut current = ranges[0].clone();

    for range in ranges.into_iter().skip(1) {
        if range.start <= current.end {
            current.end = current.end.max(range.end);
        } else {
            merged.push(current);
            current = range;
        }
    }
    merged.push(current);

    merged
}
