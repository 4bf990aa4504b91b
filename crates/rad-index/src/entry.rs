//! RAD entries: one restriction rule per row of the source document.

use std::{borrow::Cow, fmt};

use serde::{Deserialize, Deserializer, Serialize, de};

use crate::SearchField;

/// One airspace restriction rule.
///
/// Every field except `id` is optional. Values that are empty after trimming are read
/// as absent, and numeric or boolean cells are read as text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Entry {
    /// Unique rule identifier, e.g. `LSLF1139C`.
    #[serde(deserialize_with = "required_text")]
    pub id: String,
    /// Annex the rule belongs to, e.g. `2B`.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub annex: Option<String>,
    /// Free-text rule type.
    #[serde(
        rename = "type",
        default,
        deserialize_with = "text",
        skip_serializing_if = "Option::is_none"
    )]
    pub rule_type: Option<String>,
    /// Change status as published (`NEW`, `AMD`, `DEL`, `SUS`); absent means active.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub change_indicator: Option<String>,
    /// Start of validity.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub valid_from: Option<String>,
    /// End of validity; absent means until further notice.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,

    /// Point or airspace the rule applies to.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub point_or_airspace: Option<String>,
    /// Airspace designator.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub airspace: Option<String>,
    /// Airway designator.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub airway: Option<String>,
    /// Segment start point.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub from_point: Option<String>,
    /// Segment end point.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub to_point: Option<String>,
    /// Aerodrome designator.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub aerodrome: Option<String>,
    /// Direct-to arrival point.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub dct_arr_pt: Option<String>,
    /// Direct-from departure point.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub dct_dep_pt: Option<String>,
    /// First point of the STAR, or the STAR identifier.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub first_pt_star: Option<String>,
    /// Last point of the SID, or the SID identifier.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub last_pt_sid: Option<String>,

    /// Utilization text.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub utilization: Option<String>,
    /// Operational goal text.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub operational_goal: Option<String>,
    /// Arrival flight plan option.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub arr_fpl_option: Option<String>,
    /// Departure flight plan options.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub dep_fpl_options: Option<String>,
    /// Remarks.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub remarks: Option<String>,
    /// Time applicability.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub time_applicability: Option<String>,
    /// Categorisation.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub categorisation: Option<String>,
    /// Special event and crisis notes.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub special_event: Option<String>,
    /// FUA group identifier.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,
    /// Area definition (Annex 1).
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    /// Application condition (Annex 3A).
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Condition explanation (Annex 3A).
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,

    /// Space or comma separated jurisdiction codes.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub nas_fab: Option<String>,
    /// Responsible ATC unit.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub atc_unit: Option<String>,
    /// Owner.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    /// Release date.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,

    /// Uppercased catch-all text. Derived from the other fields when absent.
    #[serde(default, deserialize_with = "text", skip_serializing_if = "Option::is_none")]
    pub searchable_text: Option<String>,
}

/// Publication status of an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ChangeStatus {
    /// No change indicator: the rule is in force unchanged.
    Active,
    /// `NEW`
    New,
    /// `AMD` or `MODIFIED`
    Amended,
    /// `DEL` or `DELETED`
    Deleted,
    /// `SUS` or `SUSPENDED`
    Suspended,
    /// Any other indicator, uppercased.
    Other(String),
}

impl ChangeStatus {
    /// Interprets a raw change indicator.
    pub fn from_indicator(indicator: Option<&str>) -> Self {
        let Some(raw) = indicator.map(str::trim).filter(|s| !s.is_empty()) else {
            return Self::Active;
        };
        match raw.to_uppercase().as_str() {
            "NEW" => Self::New,
            "AMD" | "MODIFIED" => Self::Amended,
            "DEL" | "DELETED" => Self::Deleted,
            "SUS" | "SUSPENDED" => Self::Suspended,
            other => Self::Other(other.to_string()),
        }
    }

    /// Display label.
    pub fn label(&self) -> &str {
        match self {
            Self::Active => "ACTIVE",
            Self::New => "NEW",
            Self::Amended => "AMD",
            Self::Deleted => "DEL",
            Self::Suspended => "SUS",
            Self::Other(raw) => raw,
        }
    }
}

impl fmt::Display for ChangeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Entry {
    /// Creates an entry with only an identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Publication status derived from `change_indicator`.
    pub fn status(&self) -> ChangeStatus {
        ChangeStatus::from_indicator(self.change_indicator.as_deref())
    }

    /// Individual jurisdiction codes from `nas_fab`.
    pub fn jurisdictions(&self) -> impl Iterator<Item = &str> {
        self.nas_fab
            .as_deref()
            .unwrap_or_default()
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty())
    }

    /// Text of a searchable field, if present.
    ///
    /// The catch-all field is returned as stored; use [`Entry::searchable_text`] to get
    /// the derived text for entries without one.
    pub fn field(&self, field: SearchField) -> Option<&str> {
        match field {
            SearchField::Id => Some(self.id.as_str()),
            SearchField::PointOrAirspace => self.point_or_airspace.as_deref(),
            SearchField::Airspace => self.airspace.as_deref(),
            SearchField::Airway => self.airway.as_deref(),
            SearchField::FromPoint => self.from_point.as_deref(),
            SearchField::ToPoint => self.to_point.as_deref(),
            SearchField::Aerodrome => self.aerodrome.as_deref(),
            SearchField::Utilization => self.utilization.as_deref(),
            SearchField::OperationalGoal => self.operational_goal.as_deref(),
            SearchField::NasFab => self.nas_fab.as_deref(),
            SearchField::SearchableText => self.searchable_text.as_deref(),
        }
    }

    /// Text of a searchable field, deriving the catch-all text when it was not stored.
    pub fn field_text(&self, field: SearchField) -> Option<Cow<'_, str>> {
        match field {
            SearchField::SearchableText => Some(self.searchable_text()),
            other => self.field(other).map(Cow::Borrowed),
        }
    }

    /// Catch-all text: every present value joined by ` | `, uppercased.
    pub fn searchable_text(&self) -> Cow<'_, str> {
        if let Some(text) = &self.searchable_text {
            return Cow::Borrowed(text);
        }
        let joined = self
            .text_values()
            .filter_map(|(_, value)| value)
            .collect::<Vec<_>>()
            .join(" | ");
        Cow::Owned(joined.to_uppercase())
    }

    /// Validity window as `from -> until`, or `None` when both bounds are open.
    pub fn validity(&self) -> Option<String> {
        if self.valid_from.is_none() && self.valid_until.is_none() {
            return None;
        }
        Some(format!(
            "{} -> {}",
            self.valid_from.as_deref().unwrap_or("..."),
            self.valid_until.as_deref().unwrap_or("UFN")
        ))
    }

    /// All descriptive values with their labels, in document column order.
    fn text_values(&self) -> impl Iterator<Item = (&'static str, Option<&str>)> {
        [
            ("ID", Some(self.id.as_str())),
            ("Change", self.change_indicator.as_deref()),
            ("Valid from", self.valid_from.as_deref()),
            ("Valid until", self.valid_until.as_deref()),
            ("Point/Airspace", self.point_or_airspace.as_deref()),
            ("Airspace", self.airspace.as_deref()),
            ("Airway", self.airway.as_deref()),
            ("From", self.from_point.as_deref()),
            ("To", self.to_point.as_deref()),
            ("Aerodrome", self.aerodrome.as_deref()),
            ("DCT ARR point", self.dct_arr_pt.as_deref()),
            ("DCT DEP point", self.dct_dep_pt.as_deref()),
            ("First PT STAR", self.first_pt_star.as_deref()),
            ("Last PT SID", self.last_pt_sid.as_deref()),
            ("Utilization", self.utilization.as_deref()),
            ("ARR FPL option", self.arr_fpl_option.as_deref()),
            ("DEP FPL options", self.dep_fpl_options.as_deref()),
            ("Time applicability", self.time_applicability.as_deref()),
            ("Categorisation", self.categorisation.as_deref()),
            ("Operational goal", self.operational_goal.as_deref()),
            ("Definition", self.definition.as_deref()),
            ("Condition", self.condition.as_deref()),
            ("Explanation", self.explanation.as_deref()),
            ("Remarks", self.remarks.as_deref()),
            ("Special event", self.special_event.as_deref()),
            ("Group", self.group_id.as_deref()),
            ("ATC unit", self.atc_unit.as_deref()),
            ("NAS/FAB", self.nas_fab.as_deref()),
            ("Owner", self.owner.as_deref()),
            ("Release date", self.release_date.as_deref()),
        ]
        .into_iter()
    }
}

/// Plain-text rendering suitable for copying into a briefing or ticket.
impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.id)?;
        if let Some(annex) = &self.annex {
            writeln!(f, "Annex: {annex}")?;
        }
        if let Some(rule_type) = &self.rule_type {
            writeln!(f, "Type: {rule_type}")?;
        }
        writeln!(f, "Status: {}", self.status())?;
        if let Some(validity) = self.validity() {
            writeln!(f, "Valid: {validity}")?;
        }
        for (label, value) in self.text_values().skip(4) {
            if let Some(value) = value {
                writeln!(f, "{label}: {value}")?;
            }
        }
        Ok(())
    }
}

/// Raw cell value as written by the dataset generator.
#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    /// Text cell.
    Text(String),
    /// Integer cell.
    Integer(i64),
    /// Floating point cell.
    Float(f64),
    /// Boolean cell.
    Bool(bool),
}

impl Cell {
    /// Renders the cell as trimmed text, `None` when blank.
    fn into_text(self) -> Option<String> {
        let rendered = match self {
            Self::Text(s) => s,
            Self::Integer(n) => n.to_string(),
            Self::Float(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        };
        let trimmed = rendered.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Reads an optional text cell.
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Cell>::deserialize(deserializer)?.and_then(Cell::into_text))
}

/// Reads a text cell that must be present and non-blank.
fn required_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    text(deserializer)?.ok_or_else(|| de::Error::custom("identifier must not be blank"))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn entry(value: serde_json::Value) -> Entry {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn blank_and_numeric_cells_are_normalized() {
        let e = entry(json!({
            "id": "LS2857",
            "annex": "2B",
            "airway": "  ",
            "from_point": null,
            "release_date": 20250102,
            "categorisation": 1.5,
        }));

        assert_eq!(e.id, "LS2857");
        assert_eq!(e.annex.as_deref(), Some("2B"));
        assert_eq!(e.airway, None);
        assert_eq!(e.from_point, None);
        assert_eq!(e.release_date.as_deref(), Some("20250102"));
        assert_eq!(e.categorisation.as_deref(), Some("1.5"));
    }

    #[test]
    fn numeric_identifier_is_accepted() {
        let e = entry(json!({ "id": 1139 }));
        assert_eq!(e.id, "1139");
    }

    #[test]
    fn blank_identifier_is_rejected() {
        assert!(serde_json::from_value::<Entry>(json!({ "id": "" })).is_err());
        assert!(serde_json::from_value::<Entry>(json!({ "annex": "2B" })).is_err());
    }

    #[test]
    fn type_key_maps_to_rule_type() {
        let e = entry(json!({ "id": "X1", "type": "Flight Level Capping Rule" }));
        assert_eq!(e.rule_type.as_deref(), Some("Flight Level Capping Rule"));

        let out = serde_json::to_value(&e).unwrap();
        assert_eq!(out["type"], "Flight Level Capping Rule");
        assert!(out.get("airway").is_none());
    }

    #[test]
    fn status_aliases() {
        let status = |s: &str| ChangeStatus::from_indicator(Some(s));
        assert_eq!(status("new"), ChangeStatus::New);
        assert_eq!(status("AMD"), ChangeStatus::Amended);
        assert_eq!(status("Modified"), ChangeStatus::Amended);
        assert_eq!(status("DELETED"), ChangeStatus::Deleted);
        assert_eq!(status("sus"), ChangeStatus::Suspended);
        assert_eq!(status("xyz"), ChangeStatus::Other("XYZ".to_string()));
        assert_eq!(ChangeStatus::from_indicator(None), ChangeStatus::Active);
        assert_eq!(ChangeStatus::from_indicator(Some(" ")), ChangeStatus::Active);
    }

    #[test]
    fn jurisdictions_split_on_commas_and_spaces() {
        let mut e = Entry::new("X1");
        e.nas_fab = Some("LS, LF  ED,EG".to_string());
        assert_eq!(e.jurisdictions().collect::<Vec<_>>(), ["LS", "LF", "ED", "EG"]);

        assert_eq!(Entry::new("X2").jurisdictions().count(), 0);
    }

    #[test]
    fn searchable_text_is_derived_when_missing() {
        let mut e = Entry::new("ls2857");
        e.airway = Some("UN869".to_string());
        e.remarks = Some("only odd levels".to_string());

        assert_eq!(e.searchable_text(), "LS2857 | UN869 | ONLY ODD LEVELS");

        e.searchable_text = Some("STORED".to_string());
        assert_eq!(e.searchable_text(), "STORED");
    }

    #[test]
    fn validity_uses_open_bounds() {
        let mut e = Entry::new("X1");
        assert_eq!(e.validity(), None);

        e.valid_from = Some("2025-01-23".to_string());
        assert_eq!(e.validity().as_deref(), Some("2025-01-23 -> UFN"));

        e.valid_from = None;
        e.valid_until = Some("2025-03-20".to_string());
        assert_eq!(e.validity().as_deref(), Some("... -> 2025-03-20"));
    }

    #[test]
    fn display_lists_present_fields() {
        let mut e = Entry::new("LSLF1139C");
        e.annex = Some("2B".to_string());
        e.airway = Some("UN869".to_string());

        let text = e.to_string();

        assert!(text.starts_with("ID: LSLF1139C\n"));
        assert!(text.contains("Annex: 2B\n"));
        assert!(text.contains("Status: ACTIVE\n"));
        assert!(text.contains("Airway: UN869\n"));
        assert!(!text.contains("Remarks"));
    }
}
