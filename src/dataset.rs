use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use csv::{Reader, ReaderBuilder, StringRecord, Trim};

use crate::model::{NumericCell, Record, RecordTable, ReferenceCode, is_missing_token};

pub fn load_records(path: &Path) -> Result<RecordTable> {
    let file =
        File::open(path).with_context(|| format!("failed to open records table: {}", path.display()))?;
    read_records(file).with_context(|| format!("failed to load {}", path.display()))
}

pub fn load_reference_codes(path: &Path) -> Result<Vec<ReferenceCode>> {
    let file = File::open(path)
        .with_context(|| format!("failed to open reference codes: {}", path.display()))?;
    read_reference_codes(file).with_context(|| format!("failed to load {}", path.display()))
}

/// Reads the records table. Columns absent from the header produce empty
/// cells; the schema rule reports them, so this does not fail on them.
pub fn read_records<R: Read>(reader: R) -> Result<RecordTable> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let columns = csv_reader
        .headers()
        .context("failed to read records header")?
        .iter()
        .map(ToOwned::to_owned)
        .collect::<Vec<String>>();
    if columns.iter().all(|column| column.is_empty()) {
        bail!("records table has no header row");
    }

    let records = read_rows(&mut csv_reader, &columns)?;
    Ok(RecordTable { columns, records })
}

fn read_rows<R: Read>(csv_reader: &mut Reader<R>, columns: &[String]) -> Result<Vec<Record>> {
    let lookup = columns
        .iter()
        .enumerate()
        .map(|(index, column)| (column.as_str(), index))
        .collect::<HashMap<&str, usize>>();

    let mut records = Vec::new();
    for (index, row) in csv_reader.records().enumerate() {
        let row_number = index + 1;
        let row = row.with_context(|| format!("failed to parse records row {row_number}"))?;
        let cells = RowCells {
            row: &row,
            lookup: &lookup,
        };

        records.push(Record {
            row_number,
            record_id: cells.text("record_id"),
            record_type: cells.text("record_type"),
            pillar: cells.text("pillar"),
            indicator: cells.text("indicator"),
            indicator_code: cells.text("indicator_code"),
            value_numeric: cells.numeric("value_numeric"),
            observation_date: cells.text("observation_date"),
            source_name: cells.text("source_name"),
            source_url: cells.text("source_url"),
            confidence: cells.text("confidence"),
            parent_id: cells.text("parent_id"),
            related_indicator: cells.text("related_indicator"),
            impact_direction: cells.text("impact_direction"),
            impact_magnitude: cells.numeric("impact_magnitude"),
            lag_months: cells.numeric("lag_months"),
            evidence_basis: cells.text("evidence_basis"),
            blank_columns: cells.blank_columns(columns),
        });
    }

    Ok(records)
}

pub fn read_reference_codes<R: Read>(reader: R) -> Result<Vec<ReferenceCode>> {
    let mut csv_reader = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = csv_reader
        .headers()
        .context("failed to read reference codes header")?
        .clone();
    for required in ["field", "code"] {
        if !headers.iter().any(|header| header == required) {
            bail!("reference codes table is missing required column: {required}");
        }
    }

    let mut codes = Vec::new();
    for (index, row) in csv_reader.deserialize::<ReferenceCode>().enumerate() {
        let code = row.with_context(|| format!("failed to parse reference codes row {}", index + 1))?;
        codes.push(code);
    }

    Ok(codes)
}

struct RowCells<'a> {
    row: &'a StringRecord,
    lookup: &'a HashMap<&'a str, usize>,
}

impl RowCells<'_> {
    fn raw(&self, column: &str) -> &str {
        self.lookup
            .get(column)
            .and_then(|index| self.row.get(*index))
            .unwrap_or("")
    }

    fn text(&self, column: &str) -> String {
        self.raw(column).to_string()
    }

    fn numeric(&self, column: &str) -> NumericCell {
        NumericCell::parse(self.raw(column))
    }

    fn blank_columns(&self, columns: &[String]) -> Vec<String> {
        columns
            .iter()
            .filter(|column| is_missing_token(self.raw(column)))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RECORDS: &str = include_str!("../data/processed/ethiopia_fi_enriched_data.csv");
    const SAMPLE_REFERENCE_CODES: &str = include_str!("../data/raw/reference_codes.csv");

    #[test]
    fn read_records_loads_sample_dataset() {
        let table = read_records(SAMPLE_RECORDS.as_bytes()).expect("sample should load");
        assert_eq!(table.columns.len(), 21);
        assert_eq!(table.len(), 25);

        let first = &table.records[0];
        assert_eq!(first.row_number, 1);
        assert_eq!(first.record_id, "REC_0001");
        assert_eq!(first.value_numeric, NumericCell::Value(0.14));
        assert_eq!(first.observation_year(), Some(2011));

        let event = table
            .records
            .iter()
            .find(|record| record.record_id == "EVT_0001")
            .expect("telebirr event should exist");
        assert_eq!(event.pillar, "");
        assert!(event.value_numeric.is_missing());
    }

    #[test]
    fn read_records_tolerates_missing_columns() {
        let raw = "record_id,record_type,value_numeric\nREC_1,observation,0.5\n";
        let table = read_records(raw.as_bytes()).expect("partial table should load");
        assert_eq!(table.columns, vec!["record_id", "record_type", "value_numeric"]);
        assert_eq!(table.records[0].source_url, "");
        assert!(table.records[0].lag_months.is_missing());
        assert!(!table.has_column("source_url"));
    }

    #[test]
    fn header_only_table_loads_empty() {
        let raw = "record_id,record_type,value_numeric\n";
        let table = read_records(raw.as_bytes()).expect("header-only table should load");
        assert!(table.is_empty());
        assert_eq!(table.columns.len(), 3);
    }

    #[test]
    fn read_records_rejects_ragged_rows() {
        let raw = "record_id,record_type\nREC_1,observation,extra\n";
        let error = read_records(raw.as_bytes()).expect_err("ragged row should fail");
        assert!(
            error.to_string().contains("records row 1"),
            "unexpected error: {error}"
        );
    }

    #[test]
    fn read_records_rejects_empty_input() {
        let error = read_records("".as_bytes()).expect_err("empty input should fail");
        assert!(error.to_string().contains("no header row"));
    }

    #[test]
    fn read_reference_codes_loads_sample_codes() {
        let codes =
            read_reference_codes(SAMPLE_REFERENCE_CODES.as_bytes()).expect("codes should load");
        assert!(
            codes
                .iter()
                .any(|code| code.field == "record_type" && code.code == "impact_link")
        );
        assert!(codes.iter().all(|code| code.description.is_some()));
    }

    #[test]
    fn read_reference_codes_requires_field_and_code_columns() {
        let raw = "name,code\nrecord_type,event\n";
        let error = read_reference_codes(raw.as_bytes()).expect_err("missing field column");
        assert!(error.to_string().contains("field"));
    }
}
