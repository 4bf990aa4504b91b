//! Query resolution over a built index.
//!
//! A [`Resolver`] is only ever constructed from a successfully built index, so every
//! method here is infallible. Absence of a match is an empty result.


use std::collections::HashSet;

use rad_config::SearchSettings;
use rad_hint::Hint;
use serde::Serialize;
use tracing::debug;

use crate::{
    Dataset, DatasetError, Entry, EntryIndex, Metadata, ScoredEntry, Stats,
    matcher::MatcherOptions,
};

/// Queries shorter than this many characters, after trimming, return nothing.
pub const MIN_QUERY_LEN: usize = 2;

/// Builds a resolver with default settings.
pub fn build_index(dataset: Dataset) -> Result<Resolver, DatasetError> {
    Resolver::new(dataset, &SearchSettings::default())
}

/// Conjunctive filters and limit for [`Resolver::search`].
///
/// A `None` filter places no constraint on results.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Keep entries whose annex equals this value exactly.
    pub annex: Option<String>,
    /// Keep entries whose jurisdiction text contains this value.
    pub nas_fab: Option<String>,
    /// Keep entries whose change indicator equals this value, ignoring case.
    pub change_status: Option<String>,
    /// Maximum number of results; the configured default when `None`.
    pub limit: Option<usize>,
}

impl SearchOptions {
    /// Options with no filters and the default limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts results to an annex.
    pub fn annex(mut self, annex: impl Into<String>) -> Self {
        self.annex = Some(annex.into());
        self
    }

    /// Restricts results to a jurisdiction.
    pub fn nas_fab(mut self, nas_fab: impl Into<String>) -> Self {
        self.nas_fab = Some(nas_fab.into());
        self
    }

    /// Restricts results to a change status.
    pub fn change_status(mut self, status: impl Into<String>) -> Self {
        self.change_status = Some(status.into());
        self
    }

    /// Sets the result limit.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether `entry` passes every filter.
    fn accepts(&self, entry: &Entry) -> bool {
        if let Some(annex) = &self.annex
            && entry.annex.as_deref() != Some(annex.as_str())
        {
            return false;
        }
        if let Some(nas_fab) = &self.nas_fab
            && !entry
                .nas_fab
                .as_deref()
                .is_some_and(|text| text.contains(nas_fab.as_str()))
        {
            return false;
        }
        if let Some(status) = &self.change_status
            && !entry
                .change_indicator
                .as_deref()
                .is_some_and(|indicator| indicator.to_uppercase() == status.to_uppercase())
        {
            return false;
        }
        true
    }
}

/// Which lookup produced the results of an error message search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStrategy {
    /// The reference code named an entry.
    Reference,
    /// Search over the points mentioned in the message.
    Points,
    /// Full-text search over the raw message.
    FullText,
}

/// Outcome of [`Resolver::resolve_error`].
#[derive(Debug, Clone, Serialize)]
pub struct ErrorLookup<'a> {
    /// What was extracted from the message.
    pub hint: Hint,
    /// The lookup that produced `results`.
    pub strategy: LookupStrategy,
    /// Matching entries, best first.
    pub results: Vec<ScoredEntry<'a>>,
}

/// Answers queries against one immutable index.
pub struct Resolver {
    /// Flattened entries and matcher.
    index: EntryIndex,
    /// Metadata of the dataset the index was built from.
    metadata: Metadata,
    /// Limits used when a call does not give one.
    settings: SearchSettings,
}

impl Resolver {
    /// Builds the index for `dataset` using the matcher tolerance and limits in
    /// `settings`.
    pub fn new(dataset: Dataset, settings: &SearchSettings) -> Result<Self, DatasetError> {
        let (index, metadata) = EntryIndex::build(dataset, MatcherOptions::from(settings))?;
        Ok(Self::from_index(index, metadata, settings.clone()))
    }

    /// Wraps an index that was already built, e.g. with a custom matcher.
    pub fn from_index(index: EntryIndex, metadata: Metadata, settings: SearchSettings) -> Self {
        Self {
            index,
            metadata,
            settings,
        }
    }

    /// Entries whose identifier equals `id`, ignoring case and surrounding whitespace.
    pub fn search_by_id(&self, id: &str) -> Vec<&Entry> {
        let normalized = id.trim().to_uppercase();
        self.index.by_id(&normalized).collect()
    }

    /// Entries named by a reference code such as `[LSLF1139C]`.
    ///
    /// Brackets and whitespace anywhere in the code are ignored.
    pub fn search_by_reference(&self, code: &str) -> Vec<&Entry> {
        let cleaned: String = code
            .chars()
            .filter(|c| !matches!(c, '[' | ']') && !c.is_whitespace())
            .collect();
        let results = self.search_by_id(&cleaned);
        if results.is_empty() {
            debug!(reference = %cleaned.to_uppercase(), "reference not found");
        } else {
            debug!(reference = %cleaned.to_uppercase(), hits = results.len(), "reference found");
        }
        results
    }

    /// Approximate search over every weighted field, then filters.
    ///
    /// Returns results best first, at most the requested limit.
    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<ScoredEntry<'_>> {
        let query = query.trim();
        if query.chars().count() < MIN_QUERY_LEN {
            return Vec::new();
        }
        let limit = options.limit.unwrap_or(self.settings.limit);
        if limit == 0 {
            return Vec::new();
        }

        self.index
            .candidates(query, limit.saturating_mul(2))
            .into_iter()
            .filter_map(|candidate| {
                let entry = self.index.get(candidate.position)?;
                options.accepts(entry).then_some(ScoredEntry {
                    entry,
                    score: candidate.score,
                    matches: candidate.matches,
                })
            })
            .take(limit)
            .collect()
    }

    /// Finds the entries an error message is about, reporting how they were found.
    ///
    /// A reference code that resolves wins outright. Otherwise the mentioned points are
    /// searched, constrained to the mentioned annex. Otherwise the whole message is
    /// searched as free text.
    pub fn resolve_error(&self, message: &str) -> ErrorLookup<'_> {
        let hint = rad_hint::parse(message);

        if let Some(code) = &hint.reference_code {
            let found = self.search_by_reference(code);
            if !found.is_empty() {
                return ErrorLookup {
                    results: found.into_iter().map(ScoredEntry::exact).collect(),
                    strategy: LookupStrategy::Reference,
                    hint,
                };
            }
        }

        let limit = self.settings.error_limit;
        if let Some(query) = hint.points_query() {
            let mut options = SearchOptions::new().limit(limit);
            options.annex.clone_from(&hint.annex);
            return ErrorLookup {
                results: self.search(&query, &options),
                strategy: LookupStrategy::Points,
                hint,
            };
        }

        ErrorLookup {
            results: self.search(message, &SearchOptions::new().limit(limit)),
            strategy: LookupStrategy::FullText,
            hint,
        }
    }

    /// Entries an error message is about, best first.
    pub fn search_by_error(&self, message: &str) -> Vec<ScoredEntry<'_>> {
        self.resolve_error(message).results
    }

    /// Distinct identifiers of the best matches for a partial query.
    pub fn get_suggestions(&self, partial: &str, limit: Option<usize>) -> Vec<&str> {
        let limit = limit.unwrap_or(self.settings.suggestion_limit);
        let options = SearchOptions::new().limit(limit.saturating_mul(2));

        let mut seen = HashSet::new();
        self.search(partial, &options)
            .into_iter()
            .map(|result| result.entry.id.as_str())
            .filter(|id| seen.insert(*id))
            .take(limit)
            .collect()
    }

    /// Counts by annex, jurisdiction and status.
    pub fn get_stats(&self) -> Stats {
        Stats::collect(self.index.entries())
    }

    /// Approximate search restricted to one annex.
    pub fn search_in_annex(&self, annex: &str, query: &str) -> Vec<ScoredEntry<'_>> {
        let options = SearchOptions::new()
            .annex(annex)
            .limit(self.settings.annex_limit);
        self.search(query, &options)
    }

    /// Every entry of one annex, in index order.
    pub fn get_annex_entries(&self, annex: &str) -> Vec<&Entry> {
        self.index
            .entries()
            .iter()
            .filter(|entry| entry.annex.as_deref() == Some(annex))
            .collect()
    }

    /// Metadata of the loaded dataset.
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Every entry, in index order.
    pub fn entries(&self) -> &[Entry] {
        self.index.entries()
    }

    /// Number of indexed entries.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the index has no entries. Always false for a built resolver.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Settings the resolver was built with.
    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }
}
