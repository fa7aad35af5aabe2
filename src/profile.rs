use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::RecordTable;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetProfile {
    pub total_rows: usize,
    pub record_types: Vec<RecordTypeProfile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecordTypeProfile {
    pub record_type: String,
    pub rows: usize,
    /// Missing-cell count for each header column, in header order.
    pub missing_cells: Vec<ColumnMissing>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnMissing {
    pub column: String,
    pub missing: usize,
}

/// Row counts and missing-cell counts grouped by record type, sorted by name.
pub fn build_profile(table: &RecordTable) -> DatasetProfile {
    let mut grouped = BTreeMap::<&str, Vec<usize>>::new();
    for (index, record) in table.records.iter().enumerate() {
        grouped
            .entry(record.record_type.as_str())
            .or_default()
            .push(index);
    }

    let record_types = grouped
        .into_iter()
        .map(|(record_type, indices)| {
            let missing_cells = table
                .columns
                .iter()
                .map(|column| ColumnMissing {
                    column: column.clone(),
                    missing: indices
                        .iter()
                        .filter(|index| {
                            table.records[**index]
                                .blank_columns
                                .iter()
                                .any(|blank| blank == column)
                        })
                        .count(),
                })
                .collect();

            RecordTypeProfile {
                record_type: record_type.to_string(),
                rows: indices.len(),
                missing_cells,
            }
        })
        .collect();

    DatasetProfile {
        total_rows: table.len(),
        record_types,
    }
}

#[cfg(test)]
impl RecordTypeProfile {
    pub fn missing_for(&self, column: &str) -> Option<usize> {
        self.missing_cells
            .iter()
            .find(|entry| entry.column == column)
            .map(|entry| entry.missing)
    }
}
