//! Pattern-based extraction of hint fields.

use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;

use crate::{ErrorCategory, Hint};

/// Message vocabulary that is never treated as a point code.
pub const POINT_STOPLIST: &[&str] = &["ANNEX", "ROUTE", "TRAFFIC", "ERROR"];

/// `REF:` followed by an optionally bracketed alphanumeric code.
static REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"REF:\s*\[?([A-Z0-9]+)\]?").expect("reference pattern is valid")
});

/// `ANNEX` followed by a digit and an optional A-C suffix.
static ANNEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"ANNEX\s+(\d[A-C]?)").expect("annex pattern is valid"));

/// Runs of exactly five letters between ASCII word boundaries.
///
/// Accented letters count as separators, so `OMASIÉ` still yields `OMASI`.
static POINT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?-u:\b)[A-Z]{5}(?-u:\b)").expect("point pattern is valid")
});

/// Extracts a [`Hint`] from free-form error text.
///
/// Matching is case-insensitive: the text is uppercased before any pattern runs.
/// Only the first reference code and the first annex are kept.
pub fn parse(text: &str) -> Hint {
    let upper = text.to_uppercase();

    Hint {
        reference_code: first_capture(&REFERENCE, &upper),
        annex: first_capture(&ANNEX, &upper),
        points: points(&upper),
        category: ErrorCategory::classify(&upper),
    }
}

/// Returns the first capture group of the first match.
fn first_capture(pattern: &Regex, upper: &str) -> Option<String> {
    pattern
        .captures(upper)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Collects candidate point codes, dropping stoplisted words.
fn points(upper: &str) -> BTreeSet<String> {
    POINT
        .find_iter(upper)
        .map(|m| m.as_str())
        .filter(|word| !POINT_STOPLIST.contains(word))
        .map(str::to_string)
        .collect()
}
