use std::collections::{HashMap, HashSet};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::util::parse_date_prefix;

pub const RECORD_TYPE_OBSERVATION: &str = "observation";
pub const RECORD_TYPE_EVENT: &str = "event";
pub const RECORD_TYPE_IMPACT_LINK: &str = "impact_link";

pub const REQUIRED_COLUMNS: [&str; 21] = [
    "record_id",
    "record_type",
    "pillar",
    "indicator",
    "indicator_code",
    "value_numeric",
    "value_text",
    "observation_date",
    "source_name",
    "source_url",
    "confidence",
    "original_text",
    "notes",
    "collected_by",
    "collection_date",
    "parent_id",
    "related_indicator",
    "impact_direction",
    "impact_magnitude",
    "lag_months",
    "evidence_basis",
];

const MISSING_TOKENS: [&str; 3] = ["nan", "na", "null"];

/// Empty cells and the usual missing-value tokens, case-insensitive.
pub fn is_missing_token(raw: &str) -> bool {
    let trimmed = raw.trim();
    trimmed.is_empty()
        || MISSING_TOKENS
            .iter()
            .any(|token| trimmed.eq_ignore_ascii_case(token))
}

/// A numeric cell as read from the records table.
///
/// Missing cells are expected for some record types, so they are kept apart
/// from cells that hold text which is not a finite number.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum NumericCell {
    #[default]
    Missing,
    Value(f64),
    Invalid(String),
}

impl NumericCell {
    pub fn parse(raw: &str) -> Self {
        if is_missing_token(raw) {
            return Self::Missing;
        }
        let trimmed = raw.trim();

        match trimmed.parse::<f64>() {
            Ok(value) if value.is_finite() => Self::Value(value),
            _ => Self::Invalid(trimmed.to_string()),
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(value) => Some(*value),
            _ => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

static MISSING_CELL: NumericCell = NumericCell::Missing;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    /// 1-based position among the data rows (header excluded).
    pub row_number: usize,
    pub record_id: String,
    pub record_type: String,
    pub pillar: String,
    pub indicator: String,
    pub indicator_code: String,
    pub value_numeric: NumericCell,
    pub observation_date: String,
    pub source_name: String,
    pub source_url: String,
    pub confidence: String,
    pub parent_id: String,
    pub related_indicator: String,
    pub impact_direction: String,
    pub impact_magnitude: NumericCell,
    pub lag_months: NumericCell,
    pub evidence_basis: String,
    /// Header columns whose cell on this row was empty or a missing token.
    pub blank_columns: Vec<String>,
}

impl Record {
    pub fn label(&self) -> String {
        if self.record_id.is_empty() {
            format!("row {}", self.row_number)
        } else {
            self.record_id.clone()
        }
    }

    /// Text cell by column name; numeric and unknown columns read as empty.
    pub fn text(&self, column: &str) -> &str {
        match column {
            "record_id" => &self.record_id,
            "record_type" => &self.record_type,
            "pillar" => &self.pillar,
            "indicator" => &self.indicator,
            "indicator_code" => &self.indicator_code,
            "observation_date" => &self.observation_date,
            "source_name" => &self.source_name,
            "source_url" => &self.source_url,
            "confidence" => &self.confidence,
            "parent_id" => &self.parent_id,
            "related_indicator" => &self.related_indicator,
            "impact_direction" => &self.impact_direction,
            "evidence_basis" => &self.evidence_basis,
            _ => "",
        }
    }

    /// True when a text cell is empty or holds a missing-value token.
    pub fn is_blank(&self, column: &str) -> bool {
        is_missing_token(self.text(column))
    }

    pub fn numeric(&self, column: &str) -> &NumericCell {
        match column {
            "value_numeric" => &self.value_numeric,
            "impact_magnitude" => &self.impact_magnitude,
            "lag_months" => &self.lag_months,
            _ => &MISSING_CELL,
        }
    }

    pub fn is_type(&self, record_type: &str) -> bool {
        self.record_type == record_type
    }

    pub fn observation_year(&self) -> Option<i32> {
        parse_date_prefix(&self.observation_date).map(|date| date.year())
    }
}

/// The records table with the header it was read from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordTable {
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl RecordTable {
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }

    pub fn missing_columns<'a>(&self, required: &[&'a str]) -> Vec<&'a str> {
        required
            .iter()
            .copied()
            .filter(|column| !self.has_column(column))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCode {
    pub field: String,
    pub code: String,
    #[serde(default)]
    pub description: Option<String>,
}

/// Permitted codes per reference field, built once per validation run.
#[derive(Debug, Clone, Default)]
pub struct AllowLists {
    by_field: HashMap<String, HashSet<String>>,
}

impl AllowLists {
    pub fn from_codes(codes: &[ReferenceCode]) -> Self {
        let mut by_field = HashMap::<String, HashSet<String>>::new();
        for code in codes {
            by_field
                .entry(code.field.trim().to_string())
                .or_default()
                .insert(code.code.trim().to_string());
        }
        Self { by_field }
    }

    pub fn permits(&self, field: &str, value: &str) -> bool {
        self.by_field
            .get(field)
            .map(|codes| codes.contains(value))
            .unwrap_or(false)
    }

    pub fn codes_for(&self, field: &str) -> Vec<&str> {
        let mut codes = self
            .by_field
            .get(field)
            .map(|codes| codes.iter().map(String::as_str).collect::<Vec<&str>>())
            .unwrap_or_default();
        codes.sort_unstable();
        codes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_cell_distinguishes_missing_from_invalid() {
        assert_eq!(NumericCell::parse(""), NumericCell::Missing);
        assert_eq!(NumericCell::parse("  NaN "), NumericCell::Missing);
        assert_eq!(NumericCell::parse("0.35"), NumericCell::Value(0.35));
        assert_eq!(
            NumericCell::parse("35%"),
            NumericCell::Invalid("35%".to_string())
        );
        assert_eq!(
            NumericCell::parse("inf"),
            NumericCell::Invalid("inf".to_string())
        );
    }

    #[test]
    fn text_cells_treat_missing_tokens_as_blank() {
        let record = Record {
            source_name: "NA".to_string(),
            pillar: " null".to_string(),
            confidence: "high".to_string(),
            ..Record::default()
        };
        assert!(record.is_blank("source_name"));
        assert!(record.is_blank("pillar"));
        assert!(record.is_blank("source_url"));
        assert!(!record.is_blank("confidence"));
    }

    #[test]
    fn record_label_falls_back_to_row_number() {
        let record = Record {
            row_number: 7,
            ..Record::default()
        };
        assert_eq!(record.label(), "row 7");
    }

    #[test]
    fn allow_lists_group_codes_by_field() {
        let codes = vec![
            ReferenceCode {
                field: "pillar".to_string(),
                code: "access".to_string(),
                description: None,
            },
            ReferenceCode {
                field: "pillar".to_string(),
                code: " usage ".to_string(),
                description: None,
            },
            ReferenceCode {
                field: "confidence".to_string(),
                code: "high".to_string(),
                description: None,
            },
        ];

        let allow_lists = AllowLists::from_codes(&codes);
        assert!(allow_lists.permits("pillar", "usage"));
        assert!(!allow_lists.permits("pillar", "high"));
        assert!(!allow_lists.permits("record_type", "event"));
        assert_eq!(allow_lists.codes_for("pillar"), vec!["access", "usage"]);
    }
}
