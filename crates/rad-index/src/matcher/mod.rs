//! Weighted approximate multi-field text matching.
//!
//! The index asks a [`Matcher`] for candidates and applies filters and limits on top.
//! [`FuzzyMatcher`] is the built-in implementation; anything that honours the same
//! contract (ascending normalized score, per-field spans) can replace it through
//! [`EntryIndex::build_with`](crate::EntryIndex::build_with).

mod distance;
mod fuzzy;

pub use fuzzy::FuzzyMatcher;
use rad_config::SearchSettings;

use crate::FieldMatch;

/// Default normalized edit-distance threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Default minimum match fragment length, in characters.
pub const DEFAULT_MIN_MATCH_LEN: usize = 2;

/// Tolerance settings for approximate matching.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatcherOptions {
    /// Largest accepted edit distance divided by fragment length.
    /// 0.0 accepts exact matches only; 1.0 accepts anything.
    pub threshold: f64,
    /// Query fragments and matched spans shorter than this are ignored.
    pub min_match_len: usize,
}

impl Default for MatcherOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            min_match_len: DEFAULT_MIN_MATCH_LEN,
        }
    }
}

impl From<&SearchSettings> for MatcherOptions {
    fn from(settings: &SearchSettings) -> Self {
        Self {
            threshold: settings.threshold,
            min_match_len: settings.min_match_len,
        }
    }
}

/// A raw match produced by a [`Matcher`].
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// Position of the entry in the index's flattened sequence.
    pub position: usize,
    /// Combined score: 0.0 is a perfect match, 1.0 no match.
    pub score: f64,
    /// Fields that matched, with their spans.
    pub matches: Vec<FieldMatch>,
}

/// Finds entries approximately matching a free-text query.
pub trait Matcher: Send + Sync {
    /// Returns at most `limit` candidates ordered by ascending score, ties broken by
    /// position.
    fn search(&self, query: &str, limit: usize) -> Vec<Candidate>;
}
