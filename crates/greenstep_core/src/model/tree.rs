//! Tree record domain model.
//!
//! # Responsibility
//! - Define the canonical record describing one planted tree.
//! - Provide display-oriented helpers (parsed planting date, optional notes).
//!
//! # Invariants
//! - `id` is unique within a store and never reused for another tree.
//! - `planted_date` is an ISO `YYYY-MM-DD` string; it is parsed for display
//!   only and never searched.
//! - `height` and `carbon_offset` keep their embedded units as text.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PLANTED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Opaque stable identifier of a tree record (e.g. `tree-001`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TreeId(String);

impl TreeId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for TreeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TreeId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<&str> for TreeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TreeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Validation error for tree record shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeValidationError {
    /// A required text field is empty after trim.
    BlankField {
        id: TreeId,
        field: &'static str,
    },
    /// `planted_date` is not a valid `YYYY-MM-DD` calendar date.
    InvalidPlantedDate { id: TreeId, value: String },
}

impl Display for TreeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankField { id, field } => {
                write!(f, "tree `{id}` has blank required field `{field}`")
            }
            Self::InvalidPlantedDate { id, value } => {
                write!(f, "tree `{id}` has invalid planted date `{value}`")
            }
        }
    }
}

impl Error for TreeValidationError {}

/// One planted tree in the community catalog.
///
/// Serialized with camelCase names (`commonName`, `plantedDate`, ...) to match
/// the public JSON shape of a catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeRecord {
    pub id: TreeId,
    pub common_name: String,
    pub scientific_name: String,
    pub location: String,
    /// ISO calendar date, e.g. `2023-03-15`.
    pub planted_date: String,
    /// Age in whole years.
    pub age: u32,
    /// Height with embedded unit, e.g. `2.5 feet`.
    pub height: String,
    pub description: String,
    /// Ordered benefit tags rendered as labels.
    pub benefits: Vec<String>,
    /// Offset with embedded unit and period, e.g. `50 lbs CO2/year`.
    pub carbon_offset: String,
    #[serde(default)]
    pub maintenance_notes: Option<String>,
}

impl TreeRecord {
    /// Parses `planted_date` as a calendar date.
    pub fn planted_on(&self) -> Result<NaiveDate, TreeValidationError> {
        NaiveDate::parse_from_str(self.planted_date.trim(), PLANTED_DATE_FORMAT).map_err(|_| {
            TreeValidationError::InvalidPlantedDate {
                id: self.id.clone(),
                value: self.planted_date.clone(),
            }
        })
    }

    /// Returns maintenance notes, or `None` when absent or blank.
    pub fn maintenance_notes(&self) -> Option<&str> {
        self.maintenance_notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
    }

    /// Validates record shape before it is admitted into a store.
    ///
    /// # Errors
    /// - `BlankField` when `id`, `common_name`, `scientific_name` or
    ///   `location` is blank.
    /// - `InvalidPlantedDate` when `planted_date` does not parse.
    pub fn validate(&self) -> Result<(), TreeValidationError> {
        let required = [
            ("id", self.id.as_str()),
            ("common_name", self.common_name.as_str()),
            ("scientific_name", self.scientific_name.as_str()),
            ("location", self.location.as_str()),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(TreeValidationError::BlankField {
                    id: self.id.clone(),
                    field,
                });
            }
        }

        self.planted_on()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{TreeId, TreeRecord, TreeValidationError};

    fn sample() -> TreeRecord {
        TreeRecord {
            id: TreeId::new("tree-900"),
            common_name: "Linden".to_string(),
            scientific_name: "Tilia cordata".to_string(),
            location: "North Lawn".to_string(),
            planted_date: "2024-02-29".to_string(),
            age: 0,
            height: "1.2 feet".to_string(),
            description: "Small-leaved lime.".to_string(),
            benefits: vec!["Shade provision".to_string()],
            carbon_offset: "20 lbs CO2/year".to_string(),
            maintenance_notes: Some("   ".to_string()),
        }
    }

    #[test]
    fn blank_maintenance_notes_are_treated_as_absent() {
        assert_eq!(sample().maintenance_notes(), None);
    }

    #[test]
    fn planted_on_accepts_leap_day() {
        let date = sample().planted_on().expect("leap day should parse");
        assert_eq!(date.to_string(), "2024-02-29");
    }

    #[test]
    fn validate_rejects_unparseable_date() {
        let mut record = sample();
        record.planted_date = "2023-13-01".to_string();
        let err = record.validate().expect_err("month 13 must be rejected");
        assert!(matches!(err, TreeValidationError::InvalidPlantedDate { .. }));
    }

    #[test]
    fn validate_rejects_blank_location() {
        let mut record = sample();
        record.location = " ".to_string();
        let err = record.validate().expect_err("blank location must be rejected");
        assert_eq!(
            err,
            TreeValidationError::BlankField {
                id: TreeId::new("tree-900"),
                field: "location",
            }
        );
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let json = serde_json::to_value(sample()).expect("record should serialize");
        assert_eq!(json["commonName"], "Linden");
        assert_eq!(json["plantedDate"], "2024-02-29");
        assert_eq!(json["id"], "tree-900");
    }
}
