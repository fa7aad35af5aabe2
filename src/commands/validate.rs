use std::io::{self, Write};
use std::path::Path;

use anyhow::{Result, bail};
use serde::Serialize;
use tracing::{info, warn};

use crate::cli::ValidateArgs;
use crate::config::load_validation_config;
use crate::dataset::{load_records, load_reference_codes};
use crate::util::{now_utc_string, sha256_file, write_json_pretty, write_json_stdout};
use crate::validation::{Report, ReportSummary, RuleResult, validate_with_config};

const REPORT_MANIFEST_VERSION: u32 = 1;

#[derive(Debug, Serialize)]
struct ValidationReportManifest<'a> {
    manifest_version: u32,
    generated_at: String,
    status: &'static str,
    inputs: Vec<InputFingerprint>,
    summary: ReportSummary,
    results: &'a [RuleResult],
}

#[derive(Debug, Serialize)]
struct InputFingerprint {
    role: &'static str,
    path: String,
    sha256: String,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let config = load_validation_config(args.config_path.as_deref())?;
    let records = load_records(&args.records_path)?;
    let reference_codes = load_reference_codes(&args.reference_codes_path)?;

    info!(
        records_path = %args.records_path.display(),
        reference_codes_path = %args.reference_codes_path.display(),
        rows = records.len(),
        columns = records.columns.len(),
        reference_codes = reference_codes.len(),
        "loaded validation inputs"
    );

    if records.is_empty() {
        warn!(
            records_path = %args.records_path.display(),
            "records table has no data rows"
        );
    }

    let report = validate_with_config(&records, &reference_codes, &config);
    for failure in report.failures() {
        warn!(
            check_id = %failure.check_id,
            rule = %failure.rule,
            failure_kind = failure.failure_kind.map(|kind| kind.as_str()).unwrap_or_default(),
            message = failure.message.as_deref().unwrap_or_default(),
            "validation rule failed"
        );
    }

    if args.json {
        write_json_stdout(&report)?;
    } else {
        write_text_report(&report)?;
    }

    if let Some(report_path) = &args.report_path {
        let manifest = ValidationReportManifest {
            manifest_version: REPORT_MANIFEST_VERSION,
            generated_at: now_utc_string(),
            status: report.status(),
            inputs: vec![
                fingerprint("records", &args.records_path)?,
                fingerprint("reference_codes", &args.reference_codes_path)?,
            ],
            summary: report.summary(),
            results: &report.results,
        };
        write_json_pretty(report_path, &manifest)?;
        info!(path = %report_path.display(), "wrote validation report");
    }

    let summary = report.summary();
    info!(
        status = report.status(),
        total_rules = summary.total_rules,
        passed = summary.passed,
        failed = summary.failed,
        "validation finished"
    );

    if summary.failed > 0 {
        bail!(
            "{} of {} validation rules failed",
            summary.failed,
            summary.total_rules
        );
    }

    Ok(())
}

fn fingerprint(role: &'static str, path: &Path) -> Result<InputFingerprint> {
    Ok(InputFingerprint {
        role,
        path: path.display().to_string(),
        sha256: sha256_file(path)?,
    })
}

fn write_text_report(report: &Report) -> Result<()> {
    let mut output = io::BufWriter::new(io::stdout().lock());
    render_text_report(&mut output, report)?;
    output.flush()?;
    Ok(())
}

fn render_text_report<W: Write>(output: &mut W, report: &Report) -> Result<()> {
    let summary = report.summary();
    writeln!(
        output,
        "Validation: {} ({} passed, {} failed, {} rules)",
        report.status(),
        summary.passed,
        summary.failed,
        summary.total_rules
    )?;

    for result in &report.results {
        let verdict = if result.passed { "PASS" } else { "FAIL" };
        writeln!(
            output,
            "{}\t{verdict}\t{}\t{}",
            result.check_id,
            result.category.as_str(),
            result.rule
        )?;
        if let Some(kind) = result.failure_kind {
            writeln!(output, "\tfailure_kind: {}", kind.as_str())?;
        }
        if let Some(message) = &result.message {
            writeln!(output, "\tmessage: {message}")?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{read_records, read_reference_codes};
    use crate::validation::validate;

    const SAMPLE_RECORDS: &str =
        include_str!("../../data/processed/ethiopia_fi_enriched_data.csv");
    const SAMPLE_REFERENCE_CODES: &str = include_str!("../../data/raw/reference_codes.csv");

    fn sample_report() -> Report {
        let records = read_records(SAMPLE_RECORDS.as_bytes()).expect("sample records should load");
        let codes = read_reference_codes(SAMPLE_REFERENCE_CODES.as_bytes())
            .expect("sample codes should load");
        validate(&records, &codes)
    }

    #[test]
    fn text_report_lists_every_rule() {
        let report = sample_report();
        let mut buffer = Vec::new();
        render_text_report(&mut buffer, &report).expect("render should succeed");
        let text = String::from_utf8(buffer).expect("utf8 output");

        assert!(text.starts_with("Validation: passed (35 passed, 0 failed, 35 rules)"));
        assert!(text.contains("R-001\tPASS\tschema\tschema.required_columns"));
        assert_eq!(text.lines().count(), 36);
    }

    #[test]
    fn text_report_shows_failure_details() {
        let mut records =
            read_records(SAMPLE_RECORDS.as_bytes()).expect("sample records should load");
        records.records.retain(|record| record.record_type != "event");
        let codes = read_reference_codes(SAMPLE_REFERENCE_CODES.as_bytes())
            .expect("sample codes should load");
        let report = validate(&records, &codes);

        let mut buffer = Vec::new();
        render_text_report(&mut buffer, &report).expect("render should succeed");
        let text = String::from_utf8(buffer).expect("utf8 output");

        assert!(text.starts_with("Validation: failed"));
        assert!(text.contains("\tFAIL\t"));
        assert!(text.contains("\tfailure_kind: "));
    }

    #[test]
    fn report_manifest_serializes_inputs_and_summary() {
        let report = sample_report();
        let manifest = ValidationReportManifest {
            manifest_version: REPORT_MANIFEST_VERSION,
            generated_at: "2025-01-20T00:00:00Z".to_string(),
            status: report.status(),
            inputs: vec![InputFingerprint {
                role: "records",
                path: "records.csv".to_string(),
                sha256: "abc".to_string(),
            }],
            summary: report.summary(),
            results: &report.results,
        };

        let value = serde_json::to_value(&manifest).expect("manifest should serialize");
        assert_eq!(value["status"], "passed");
        assert_eq!(value["summary"]["total_rules"], 35);
        assert_eq!(value["inputs"][0]["role"], "records");
        assert_eq!(value["results"].as_array().map(Vec::len), Some(35));
    }
}
