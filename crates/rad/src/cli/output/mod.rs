//! Rendering and JSON serialization for CLI output.

use std::{
    io::{self, IsTerminal},
    ops::Range,
    process::ExitCode,
};

pub use rad_highlight::{dim, header, subheader};
use rad_highlight::{Highlighter, mark_ranges, rule, status};
use rad_index::{Entry, FieldMatch, Hint, ScoredEntry, SearchField};
use serde::Serialize;

/// Bytes of context kept on each side of a match in catch-all text snippets.
const SNIPPET_CONTEXT: usize = 40;

/// Width of the label column in entry listings.
const LABEL_WIDTH: usize = 16;

/// JSON output for commands returning scored entries.
#[derive(Serialize)]
struct JsonResults<'a, 'b> {
    /// Query text the results answer.
    query: &'b str,
    /// Number of results.
    total: usize,
    /// Results, best first.
    results: &'b [ScoredEntry<'a>],
}

/// Prints any serializable value as pretty JSON, syntax-highlighted on a terminal.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> ExitCode {
    match render_json(value, io::stdout().is_terminal()) {
        Ok(json) => {
            print!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Renders `value` as pretty JSON with a trailing newline.
fn render_json<T: Serialize + ?Sized>(value: &T, highlight: bool) -> serde_json::Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    if highlight {
        json = Highlighter::new().highlight_json(&json);
    }
    Ok(json)
}

/// Outputs scored search results as text or JSON.
pub fn output_scored(results: &[ScoredEntry<'_>], query: &str, json: bool) -> ExitCode {
    if json {
        return print_json(&JsonResults {
            query,
            total: results.len(),
            results,
        });
    }

    if results.is_empty() {
        println!("{}", dim("No results found."));
        return ExitCode::SUCCESS;
    }

    for result in results {
        print!("{}", format_scored_entry(result));
        println!();
    }
    println!("{}", dim(&format!("{} result(s)", results.len())));
    ExitCode::SUCCESS
}

/// Outputs unscored entries, such as exact lookups, as text or JSON.
pub fn output_entries(entries: &[&Entry], json: bool) -> ExitCode {
    if json {
        return print_json(entries);
    }

    if entries.is_empty() {
        println!("{}", dim("No entries found."));
        return ExitCode::SUCCESS;
    }

    for entry in entries {
        print!("{}", format_entry(entry, &[]));
        println!();
    }
    println!("{}", dim(&format!("{} entr{}", entries.len(), plural_y(entries.len()))));
    ExitCode::SUCCESS
}

/// Prints the hints extracted from an error message.
pub fn print_hint(hint: &Hint) {
    println!("{}", subheader("Extracted hints:"));
    print_label_value("Reference", hint.reference_code.as_deref());
    print_label_value("Annex", hint.annex.as_deref());
    let points = hint.points_query();
    print_label_value("Points", points.as_deref());
    let category = hint.category.map(|c| c.as_str());
    print_label_value("Category", category);
    println!("{}", rule(40));
}

/// Prints one aligned label/value line, dimming absent values.
fn print_label_value(label: &str, value: Option<&str>) {
    match value {
        Some(value) => println!("   {label:LABEL_WIDTH$}{value}"),
        None => println!("   {label:LABEL_WIDTH$}{}", dim("-")),
    }
}

/// Formats a search result with its score and highlighted matches.
pub fn format_scored_entry(result: &ScoredEntry<'_>) -> String {
    let mut output = format_entry(result.entry, &result.matches);
    // Insert the score after the heading line.
    if let Some(newline) = output.find('\n') {
        output.insert_str(newline, &format!("  {}", dim(&format!("score {:.3}", result.score))));
    }
    output
}

/// Formats an entry: a heading line, then the searchable fields that are present.
///
/// Spans in `matches` are highlighted. When only the catch-all text matched, a snippet
/// of it is shown so the reason for the hit stays visible.
pub fn format_entry(entry: &Entry, matches: &[FieldMatch]) -> String {
    let mut output = String::new();

    let id = highlighted(&entry.id, matches, SearchField::Id);
    output.push_str(&subheader(&id));
    if let Some(annex) = &entry.annex {
        output.push_str(&format!("  {}", header(annex)));
    }
    output.push_str(&format!("  {}\n", status(entry.status().label())));

    if let Some(rule_type) = &entry.rule_type {
        output.push_str(&format!("   {}\n", dim(rule_type)));
    }

    let mut shown_match = false;
    for field in SearchField::ALL {
        if matches!(field, SearchField::Id | SearchField::SearchableText) {
            continue;
        }
        let Some(text) = entry.field(field) else {
            continue;
        };
        shown_match |= matches.iter().any(|m| m.field == field);
        output.push_str(&format!(
            "   {:LABEL_WIDTH$}{}\n",
            field_label(field),
            highlighted(text, matches, field)
        ));
    }

    if !shown_match
        && let Some(m) = matches.iter().find(|m| m.field == SearchField::SearchableText)
    {
        let text = entry.searchable_text();
        output.push_str(&format!(
            "   {:LABEL_WIDTH$}{}\n",
            "Matched in",
            snippet(&text, &m.ranges)
        ));
    }

    if let Some(validity) = entry.validity() {
        output.push_str(&format!("   {:LABEL_WIDTH$}{}\n", "Valid", dim(&validity)));
    }

    output
}

/// Returns `text` with the spans of `field` highlighted, if that field matched.
fn highlighted(text: &str, matches: &[FieldMatch], field: SearchField) -> String {
    match matches.iter().find(|m| m.field == field) {
        Some(m) => mark_ranges(text, &m.ranges),
        None => text.to_string(),
    }
}

/// Cuts a window of `text` around the first range and highlights the ranges inside it.
fn snippet(text: &str, ranges: &[Range<usize>]) -> String {
    let Some(first) = ranges.first() else {
        return text.to_string();
    };

    let mut start = first.start.min(text.len()).saturating_sub(SNIPPET_CONTEXT);
    while !text.is_char_boundary(start) {
        start -= 1;
    }
    let mut end = first.end.saturating_add(SNIPPET_CONTEXT).min(text.len());
    while !text.is_char_boundary(end) {
        end += 1;
    }

    let shifted: Vec<Range<usize>> = ranges
        .iter()
        .filter(|r| r.start >= start && r.end <= end)
        .map(|r| r.start - start..r.end - start)
        .collect();

    let mut output = String::new();
    if start > 0 {
        output.push('…');
    }
    output.push_str(&mark_ranges(&text[start..end], &shifted));
    if end < text.len() {
        output.push('…');
    }
    output
}

/// Human label for a searchable field.
pub fn field_label(field: SearchField) -> &'static str {
    match field {
        SearchField::Id => "ID",
        SearchField::PointOrAirspace => "Point/Airspace",
        SearchField::Airspace => "Airspace",
        SearchField::Airway => "Airway",
        SearchField::FromPoint => "From",
        SearchField::ToPoint => "To",
        SearchField::Aerodrome => "Aerodrome",
        SearchField::Utilization => "Utilization",
        SearchField::OperationalGoal => "Operational goal",
        SearchField::NasFab => "NAS/FAB",
        SearchField::SearchableText => "Text",
    }
}

/// Suffix for "entry"/"entries".
fn plural_y(count: usize) -> &'static str {
    if count == 1 { "y" } else { "ies" }
}
