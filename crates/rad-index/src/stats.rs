//! Aggregate counts over an index.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::Entry;

/// Annex key used for entries without an annex.
pub const UNKNOWN_ANNEX: &str = "UNKNOWN";

/// Status key used for entries without a change indicator.
pub const ACTIVE_STATUS: &str = "ACTIVE";

/// Entry counts by annex, jurisdiction and status.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    /// Number of entries.
    pub total: usize,
    /// Counts by normalized annex: uppercase letters and digits only.
    pub by_annex: BTreeMap<String, usize>,
    /// Counts by jurisdiction token. An entry listing several jurisdictions counts once
    /// for each.
    pub by_country: BTreeMap<String, usize>,
    /// Counts by uppercased change indicator, `ACTIVE` when absent.
    pub by_status: BTreeMap<String, usize>,
}

impl Stats {
    /// Counts `entries` in a single pass.
    pub fn collect(entries: &[Entry]) -> Self {
        let mut stats = Self {
            total: entries.len(),
            ..Self::default()
        };

        for entry in entries {
            *stats.by_annex.entry(annex_key(entry.annex.as_deref())).or_default() += 1;

            for token in entry.jurisdictions() {
                *stats.by_country.entry(token.to_string()).or_default() += 1;
            }

            let status = entry
                .change_indicator
                .as_deref()
                .map_or_else(|| ACTIVE_STATUS.to_string(), str::to_uppercase);
            *stats.by_status.entry(status).or_default() += 1;
        }

        stats
    }
}

/// Normalizes an annex tag into a bucket key, e.g. `2b` and `2-B` both become `2B`.
fn annex_key(annex: Option<&str>) -> String {
    let key: String = annex
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_uppercase())
        .collect();
    if key.is_empty() {
        UNKNOWN_ANNEX.to_string()
    } else {
        key
    }
}
