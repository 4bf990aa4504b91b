//! Terminal styling for rad output.
//!
//! Covers three things: marking matched spans inside entry fields, colouring change
//! statuses and headings, and syntax-highlighting the effective configuration.

#![warn(missing_docs)]

use std::ops::Range;

use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// Syntax highlighter for configuration and JSON snippets.
pub struct Highlighter {
    /// Language definitions, including TOML from the two-face extras.
    syntax_set: SyntaxSet,
    /// Embedded colour themes.
    theme_set: EmbeddedLazyThemeSet,
    /// Theme in use.
    theme: EmbeddedThemeName,
}

impl Default for Highlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl Highlighter {
    /// Creates a highlighter with the Dracula theme.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
            theme: EmbeddedThemeName::Dracula,
        }
    }

    /// Highlights TOML.
    pub fn highlight_toml(&self, content: &str) -> String {
        self.highlight(content, "toml")
    }

    /// Highlights JSON.
    pub fn highlight_json(&self, content: &str) -> String {
        self.highlight(content, "json")
    }

    /// Highlights `content` with the syntax named by extension or name.
    ///
    /// Unknown syntaxes fall back to plain text.
    pub fn highlight(&self, content: &str, syntax_name: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension(syntax_name)
            .or_else(|| self.syntax_set.find_syntax_by_name(syntax_name))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let mut highlighter = HighlightLines::new(syntax, self.theme_set.get(self.theme));

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(colors::RESET);
        output
    }
}

/// ANSI escape codes.
pub mod colors {
    /// Bold.
    pub const BOLD: &str = "\x1b[1m";
    /// Underline.
    pub const UNDERLINE: &str = "\x1b[4m";
    /// Cyan, for headings.
    pub const CYAN: &str = "\x1b[36m";
    /// Green, for new entries and success.
    pub const GREEN: &str = "\x1b[32m";
    /// Yellow, for amended entries, matches and warnings.
    pub const YELLOW: &str = "\x1b[33m";
    /// Red, for deleted or suspended entries and errors.
    pub const RED: &str = "\x1b[31m";
    /// Dim.
    pub const DIM: &str = "\x1b[2m";
    /// Reset all formatting.
    pub const RESET: &str = "\x1b[0m";
}

/// Wraps `text` in `style` followed by a reset.
fn paint(style: &str, text: &str) -> String {
    format!("{style}{text}{}", colors::RESET)
}

/// Bold cyan heading.
pub fn header(text: &str) -> String {
    paint(&format!("{}{}", colors::BOLD, colors::CYAN), text)
}

/// Bold text.
pub fn subheader(text: &str) -> String {
    paint(colors::BOLD, text)
}

/// Dimmed text.
pub fn dim(text: &str) -> String {
    paint(colors::DIM, text)
}

/// Green text.
pub fn success(text: &str) -> String {
    paint(colors::GREEN, text)
}

/// Yellow text.
pub fn warning(text: &str) -> String {
    paint(colors::YELLOW, text)
}

/// Red text.
pub fn error(text: &str) -> String {
    paint(colors::RED, text)
}

/// Dimmed horizontal rule.
pub fn rule(width: usize) -> String {
    dim(&"─".repeat(width))
}

/// Colours a change status label: new is green, amended yellow, deleted and suspended
/// red, anything else dimmed.
pub fn status(label: &str) -> String {
    match label {
        "NEW" => success(label),
        "AMD" => warning(label),
        "DEL" | "SUS" => error(label),
        _ => dim(label),
    }
}

/// Marks the byte `ranges` of `text` in bold underlined yellow.
///
/// Ranges must be sorted and non-overlapping. Ranges that fall outside `text` or split
/// a character are skipped.
pub fn mark_ranges(text: &str, ranges: &[Range<usize>]) -> String {
    let mut output = String::with_capacity(text.len() + ranges.len() * 16);
    let mut cursor = 0;

    for range in ranges {
        if range.start < cursor
            || range.end > text.len()
            || range.start >= range.end
            || !text.is_char_boundary(range.start)
            || !text.is_char_boundary(range.end)
        {
            continue;
        }
        output.push_str(&text[cursor..range.start]);
        output.push_str(colors::BOLD);
        output.push_str(colors::UNDERLINE);
        output.push_str(colors::YELLOW);
        output.push_str(&text[range.clone()]);
        output.push_str(colors::RESET);
        cursor = range.end;
    }
    output.push_str(&text[cursor..]);
    output
}
