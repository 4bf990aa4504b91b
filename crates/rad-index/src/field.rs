//! Searchable entry fields and their ranking weights.

use std::fmt;

use serde::Serialize;

/// A text field of an [`Entry`](crate::Entry) that participates in fuzzy search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    /// Rule identifier.
    Id,
    /// Point or airspace the rule applies to.
    PointOrAirspace,
    /// Airspace designator.
    Airspace,
    /// Airway designator.
    Airway,
    /// Start point of a route segment.
    FromPoint,
    /// End point of a route segment.
    ToPoint,
    /// Aerodrome designator.
    Aerodrome,
    /// Utilization text.
    Utilization,
    /// Operational goal text.
    OperationalGoal,
    /// Jurisdiction codes.
    NasFab,
    /// Catch-all text built from every column of the source row.
    SearchableText,
}

impl SearchField {
    /// Every searchable field, in declaration order.
    pub const ALL: [Self; 11] = [
        Self::Id,
        Self::PointOrAirspace,
        Self::Airspace,
        Self::Airway,
        Self::FromPoint,
        Self::ToPoint,
        Self::Aerodrome,
        Self::Utilization,
        Self::OperationalGoal,
        Self::NasFab,
        Self::SearchableText,
    ];

    /// Relative ranking weight. Identifier and geometry fields outrank narrative text.
    pub const fn weight(self) -> f64 {
        match self {
            Self::Id => 3.0,
            Self::PointOrAirspace | Self::Airspace | Self::Airway | Self::Aerodrome => 2.0,
            Self::FromPoint | Self::ToPoint => 1.5,
            Self::Utilization | Self::NasFab => 1.0,
            Self::OperationalGoal => 0.8,
            Self::SearchableText => 0.5,
        }
    }

    /// Sum of all field weights.
    pub fn total_weight() -> f64 {
        Self::ALL.iter().map(|f| f.weight()).sum()
    }

    /// Dataset key of the field.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::PointOrAirspace => "point_or_airspace",
            Self::Airspace => "airspace",
            Self::Airway => "airway",
            Self::FromPoint => "from_point",
            Self::ToPoint => "to_point",
            Self::Aerodrome => "aerodrome",
            Self::Utilization => "utilization",
            Self::OperationalGoal => "operational_goal",
            Self::NasFab => "nas_fab",
            Self::SearchableText => "searchable_text",
        }
    }
}

impl fmt::Display for SearchField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
