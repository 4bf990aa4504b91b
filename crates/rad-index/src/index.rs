//! The flattened entry sequence and the matcher built over it.

use std::collections::HashMap;

use tracing::info;

use crate::{
    Dataset, DatasetError, Entry, Metadata,
    matcher::{Candidate, FuzzyMatcher, Matcher, MatcherOptions},
};

/// Immutable index over one dataset snapshot.
///
/// Owns every entry of the snapshot in category order. Nothing in the index changes
/// after construction; a new dataset builds a new index.
pub struct EntryIndex {
    /// Entries in category order, then document order within each category.
    entries: Vec<Entry>,
    /// Positions of entries by uppercased identifier.
    ids: HashMap<String, Vec<usize>>,
    /// Approximate matcher over `entries`.
    matcher: Box<dyn Matcher>,
}

impl EntryIndex {
    /// Flattens `dataset` and builds the default [`FuzzyMatcher`] over it.
    ///
    /// Returns the dataset metadata alongside the index, since the per-category lists
    /// are consumed by flattening.
    pub fn build(dataset: Dataset, options: MatcherOptions) -> Result<(Self, Metadata), DatasetError> {
        Self::build_with(dataset, |entries| {
            Box::new(FuzzyMatcher::new(entries, options))
        })
    }

    /// Flattens `dataset` and builds the matcher produced by `factory` over it.
    pub fn build_with<F>(dataset: Dataset, factory: F) -> Result<(Self, Metadata), DatasetError>
    where
        F: FnOnce(&[Entry]) -> Box<dyn Matcher>,
    {
        let (metadata, categories) = dataset.into_parts();
        let category_count = categories.len();

        let entries: Vec<Entry> = categories.into_iter().flat_map(|c| c.entries).collect();
        if entries.is_empty() {
            return Err(DatasetError::Empty);
        }

        let mut ids: HashMap<String, Vec<usize>> = HashMap::new();
        for (position, entry) in entries.iter().enumerate() {
            ids.entry(entry.id.to_uppercase()).or_default().push(position);
        }

        let matcher = factory(&entries);
        info!(
            entries = entries.len(),
            categories = category_count,
            "flattened dataset"
        );

        Ok((
            Self {
                entries,
                ids,
                matcher,
            },
            metadata,
        ))
    }

    /// All entries in index order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index has no entries. Always false for a built index.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries whose identifier equals `normalized`, which must already be uppercased.
    pub(crate) fn by_id(&self, normalized: &str) -> impl Iterator<Item = &Entry> {
        self.ids
            .get(normalized)
            .into_iter()
            .flatten()
            .map(|&position| &self.entries[position])
    }

    /// Runs the matcher.
    pub(crate) fn candidates(&self, query: &str, limit: usize) -> Vec<Candidate> {
        self.matcher.search(query, limit)
    }

    /// Entry at a position reported by the matcher.
    pub(crate) fn get(&self, position: usize) -> Option<&Entry> {
        self.entries.get(position)
    }
}
