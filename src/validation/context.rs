use super::*;

const MAX_LISTED_LABELS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub kind: FailureKind,
    pub message: String,
}

impl Violation {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

pub type RuleOutcome = Result<(), Violation>;

/// Read-only state shared by every rule in one validation run.
pub struct RuleContext<'a> {
    pub table: &'a RecordTable,
    pub config: &'a ValidationConfig,
    pub allow_lists: AllowLists,
}

impl<'a> RuleContext<'a> {
    pub fn new(
        table: &'a RecordTable,
        reference_codes: &[ReferenceCode],
        config: &'a ValidationConfig,
    ) -> Self {
        Self {
            table,
            config,
            allow_lists: AllowLists::from_codes(reference_codes),
        }
    }

    pub fn records(&self) -> &'a [Record] {
        &self.table.records
    }

    pub fn records_of_type(&self, record_type: &str) -> Vec<&'a Record> {
        self.records()
            .iter()
            .filter(|record| record.is_type(record_type))
            .collect()
    }

    /// Observation rows for one indicator code, in table order.
    pub fn observations_for(&self, indicator_code: &str) -> Vec<&'a Record> {
        self.records()
            .iter()
            .filter(|record| {
                record.is_type(RECORD_TYPE_OBSERVATION) && record.indicator_code == indicator_code
            })
            .collect()
    }

    pub fn first_observation(&self, indicator_code: &str) -> Option<&'a Record> {
        self.records().iter().find(|record| {
            record.is_type(RECORD_TYPE_OBSERVATION) && record.indicator_code == indicator_code
        })
    }

    /// Value of the first-seen observation for `indicator_code`, or `None`
    /// when no such row exists. A row without a usable value is a violation.
    pub fn first_observation_value(&self, indicator_code: &str) -> Result<Option<f64>, Violation> {
        let Some(record) = self.first_observation(indicator_code) else {
            return Ok(None);
        };

        match &record.value_numeric {
            NumericCell::Value(value) => Ok(Some(*value)),
            NumericCell::Missing => Err(Violation::new(
                FailureKind::Completeness,
                format!("{indicator_code} value missing ({})", record.label()),
            )),
            NumericCell::Invalid(raw) => Err(Violation::new(
                FailureKind::Range,
                format!(
                    "{indicator_code} value {raw:?} ({}) is not numeric",
                    record.label()
                ),
            )),
        }
    }

    pub fn require_columns(&self, columns: &[&str]) -> RuleOutcome {
        let missing = self.table.missing_columns(columns);
        if missing.is_empty() {
            return Ok(());
        }

        Err(Violation::new(
            FailureKind::Schema,
            format!("requires missing column(s): {}", missing.join(", ")),
        ))
    }
}

/// Joins row labels for a message, listing at most a handful of them.
pub fn format_labels(labels: &[String]) -> String {
    let mut joined = labels
        .iter()
        .take(MAX_LISTED_LABELS)
        .cloned()
        .collect::<Vec<String>>()
        .join(", ");
    if labels.len() > MAX_LISTED_LABELS {
        joined.push_str(&format!(" (+{} more)", labels.len() - MAX_LISTED_LABELS));
    }
    joined
}

pub fn ratio(numerator: usize, denominator: usize) -> Option<f64> {
    if denominator == 0 {
        None
    } else {
        Some(numerator as f64 / denominator as f64)
    }
}

pub fn display_value(value: &str) -> &str {
    if value.is_empty() { "(empty)" } else { value }
}
