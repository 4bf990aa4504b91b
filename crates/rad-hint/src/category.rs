//! Error categories recognised in validator messages.

use std::fmt;

use serde::Serialize;

/// Coarse classification of a rejection message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCategory {
    /// The route is forbidden by a rule.
    Forbidden,
    /// The route is restricted.
    Restricted,
    /// A point, airway, or connection is not available.
    NotAvailable,
}

impl ErrorCategory {
    /// Keywords checked in priority order. The first keyword contained in the
    /// message decides the category.
    const KEYWORDS: [(&'static str, Self); 3] = [
        ("FORBIDDEN", Self::Forbidden),
        ("RESTRICTED", Self::Restricted),
        ("NOT AVAILABLE", Self::NotAvailable),
    ];

    /// Classifies uppercased message text.
    pub(crate) fn classify(upper: &str) -> Option<Self> {
        Self::KEYWORDS
            .iter()
            .find(|(keyword, _)| upper.contains(keyword))
            .map(|(_, category)| *category)
    }

    /// Returns the canonical label, e.g. `NOT_AVAILABLE`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Forbidden => "FORBIDDEN",
            Self::Restricted => "RESTRICTED",
            Self::NotAvailable => "NOT_AVAILABLE",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
