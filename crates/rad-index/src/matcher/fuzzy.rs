//! Built-in approximate matcher.
//!
//! Each query fragment (whitespace-separated word) is aligned against each weighted
//! field with a semi-global edit distance, so a fragment may match anywhere inside a
//! field. A fragment counts when `distance / fragment length` is within the threshold.
//!
//! Scores combine per field the same way weighted fuzzy finders usually do: a field's
//! score is raised to its share of the total weight and the results are multiplied.
//! Low scores in heavy fields therefore dominate the ranking.

use std::ops::Range;

use super::{Candidate, Matcher, MatcherOptions, distance::best_alignment};
use crate::{Entry, FieldMatch, SearchField, types::merge_ranges};

/// Slack added before flooring the allowed edit count.
const THRESHOLD_SLACK: f64 = 1e-9;

/// Case-folds a single character, keeping a one-to-one character mapping.
fn fold(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

/// Case-folded text of one field, with the byte offset of every character.
#[derive(Debug)]
struct FoldedField {
    /// Which field this is.
    field: SearchField,
    /// Folded characters.
    chars: Vec<char>,
    /// Byte offset of each character in the original text, plus the text length.
    offsets: Vec<usize>,
}

impl FoldedField {
    /// Folds `text` for matching.
    fn new(field: SearchField, text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut offsets = Vec::with_capacity(text.len() + 1);
        for (offset, c) in text.char_indices() {
            chars.push(fold(c));
            offsets.push(offset);
        }
        offsets.push(text.len());
        Self {
            field,
            chars,
            offsets,
        }
    }

    /// Converts a character span into a byte range of the original text.
    fn byte_range(&self, span: Range<usize>) -> Range<usize> {
        self.offsets[span.start]..self.offsets[span.end]
    }
}

/// Approximate matcher over the weighted [`SearchField`]s of a set of entries.
#[derive(Debug)]
pub struct FuzzyMatcher {
    /// Tolerance settings.
    options: MatcherOptions,
    /// Folded field texts per entry, indexed by entry position.
    records: Vec<Vec<FoldedField>>,
    /// Sum of all field weights.
    total_weight: f64,
}

impl FuzzyMatcher {
    /// Builds the matcher over `entries`. Positions in results index into this slice.
    pub fn new(entries: &[Entry], options: MatcherOptions) -> Self {
        let records = entries
            .iter()
            .map(|entry| {
                SearchField::ALL
                    .iter()
                    .filter_map(|&field| {
                        entry
                            .field_text(field)
                            .map(|text| FoldedField::new(field, &text))
                    })
                    .collect()
            })
            .collect();

        Self {
            options,
            records,
            total_weight: SearchField::total_weight(),
        }
    }

    /// Splits a query into distinct folded fragments long enough to match.
    fn fragments(&self, query: &str) -> Vec<Vec<char>> {
        let mut fragments: Vec<Vec<char>> = Vec::new();
        for word in query.split_whitespace() {
            let folded: Vec<char> = word.chars().map(fold).collect();
            if folded.len() >= self.options.min_match_len && !fragments.contains(&folded) {
                fragments.push(folded);
            }
        }
        fragments
    }

    /// Largest edit distance accepted for a fragment of `len` characters.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn max_distance(&self, len: usize) -> usize {
        (self.options.threshold * len as f64 + THRESHOLD_SLACK).floor() as usize
    }

    /// Matches every fragment against one field.
    ///
    /// Fragments that do not match count as a score of 1.0 towards the field average.
    fn match_field(&self, folded: &FoldedField, fragments: &[Vec<char>]) -> Option<FieldMatch> {
        let mut total = 0.0;
        let mut ranges = Vec::new();

        for fragment in fragments {
            let accepted = best_alignment(fragment, &folded.chars, self.max_distance(fragment.len()))
                .filter(|a| a.span.len() >= self.options.min_match_len);
            match accepted {
                Some(alignment) => {
                    total += alignment.distance as f64 / fragment.len() as f64;
                    ranges.push(folded.byte_range(alignment.span));
                }
                None => total += 1.0,
            }
        }

        if ranges.is_empty() {
            return None;
        }

        Some(FieldMatch {
            field: folded.field,
            score: total / fragments.len() as f64,
            ranges: merge_ranges(ranges),
        })
    }

    /// Scores one entry, or returns `None` when no field matched.
    fn score_record(
        &self,
        position: usize,
        fields: &[FoldedField],
        fragments: &[Vec<char>],
    ) -> Option<Candidate> {
        let mut score = 1.0_f64;
        let mut matches = Vec::new();

        for folded in fields {
            if let Some(m) = self.match_field(folded, fragments) {
                let exponent = folded.field.weight() / self.total_weight;
                score *= m.score.max(f64::EPSILON).powf(exponent);
                matches.push(m);
            }
        }

        (!matches.is_empty()).then_some(Candidate {
            position,
            score,
            matches,
        })
    }
}

impl Matcher for FuzzyMatcher {
    fn search(&self, query: &str, limit: usize) -> Vec<Candidate> {
        if limit == 0 {
            return Vec::new();
        }

        let fragments = self.fragments(query);
        if fragments.is_empty() {
            return Vec::new();
        }

        let mut candidates: Vec<Candidate> = self
            .records
            .iter()
            .enumerate()
            .filter_map(|(position, fields)| self.score_record(position, fields, &fragments))
            .collect();

        candidates.sort_by(|a, b| {
            a.score
                .total_cmp(&b.score)
                .then_with(|| a.position.cmp(&b.position))
        });
        candidates.truncate(limit);
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, configure: impl FnOnce(&mut Entry)) -> Entry {
        let mut e = Entry::new(id);
        configure(&mut e);
        e
    }

    fn matcher(entries: &[Entry]) -> FuzzyMatcher {
        FuzzyMatcher::new(entries, MatcherOptions::default())
    }

    #[test]
    fn matches_case_insensitively_anywhere_in_field() {
        let entries = [
            entry("A1", |e| e.remarks = Some("x".into())),
            entry("B2", |e| e.airway = Some("dct omasi gersa".into())),
        ];
        let results = matcher(&entries).search("OMASI", 10);

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].position, 1);
        let airway = results[0]
            .matches
            .iter()
            .find(|m| m.field == SearchField::Airway)
            .unwrap();
        assert_eq!(airway.ranges, vec![4..9]);
        assert_eq!(airway.score, 0.0);
    }

    #[test]
    fn tolerates_small_typos_within_threshold() {
        let entries = [entry("R1", |e| e.point_or_airspace = Some("OMASI".into()))];
        let m = matcher(&entries);

        assert_eq!(m.search("OMASY", 10).len(), 1);
        assert!(m.search("OMXYZ", 10).is_empty());
    }

    #[test]
    fn identifier_match_outranks_narrative_match() {
        let entries = [
            entry("R1", |e| e.operational_goal = Some("protect GERSA flows".into())),
            entry("GERSA1", |_| {}),
        ];
        let results = matcher(&entries).search("GERSA", 10);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].position, 1);
        assert!(results[0].score < results[1].score);
    }

    #[test]
    fn equal_scores_keep_insertion_order() {
        let entries = [
            entry("A1", |e| e.airway = Some("UN869".into())),
            entry("A2", |e| e.airway = Some("UN869".into())),
        ];
        let results = matcher(&entries).search("UN869", 10);

        let positions: Vec<_> = results.iter().map(|c| c.position).collect();
        assert_eq!(positions, [0, 1]);
    }

    #[test]
    fn short_fragments_are_ignored() {
        let entries = [entry("A1", |e| e.airway = Some("A B C".into()))];
        let m = matcher(&entries);

        assert!(m.search("a", 10).is_empty());
        assert!(m.search("a b", 10).is_empty());
    }

    #[test]
    fn limit_truncates() {
        let entries: Vec<Entry> = (0..5)
            .map(|i| entry(&format!("LS{i}"), |e| e.nas_fab = Some("LS".into())))
            .collect();
        let m = matcher(&entries);

        assert_eq!(m.search("LS", 3).len(), 3);
        assert!(m.search("LS", 0).is_empty());
    }

    #[test]
    fn spans_are_byte_offsets_into_original_text() {
        let entries = [
            entry("A1", |e| e.remarks = Some("x".into())),
            entry("A2", |e| e.utilization = Some("Zürich OMASI".into())),
        ];
        let results = matcher(&entries).search("omasi", 10);
        let utilization = results[0]
            .matches
            .iter()
            .find(|m| m.field == SearchField::Utilization)
            .unwrap();

        let text = entries[1].utilization.as_deref().unwrap();
        assert_eq!(&text[utilization.ranges[0].clone()], "OMASI");
    }
}
