use anyhow::{Result, bail};
use tracing::info;

use crate::charts::{CHART_IDS, ChartSpec, build_chart, build_dashboard};
use crate::cli::ChartsArgs;
use crate::dataset::load_records;
use crate::model::RecordTable;
use crate::util::{write_json_pretty, write_json_stdout};

pub fn run(args: ChartsArgs) -> Result<()> {
    let records = load_records(&args.records_path)?;
    let specs = select_charts(&records, &args.chart_ids)?;

    for spec in &specs {
        info!(
            chart_id = %spec.chart_id,
            series = spec.series.len(),
            points = spec.series.iter().map(|series| series.points.len()).sum::<usize>(),
            "built chart"
        );
    }

    match &args.output_path {
        Some(path) => {
            write_json_pretty(path, &specs)?;
            info!(path = %path.display(), charts = specs.len(), "wrote chart specs");
        }
        None => write_json_stdout(&specs)?,
    }

    Ok(())
}

fn select_charts(records: &RecordTable, chart_ids: &[String]) -> Result<Vec<ChartSpec>> {
    if chart_ids.is_empty() {
        return Ok(build_dashboard(records));
    }

    let mut specs = Vec::with_capacity(chart_ids.len());
    for chart_id in chart_ids {
        let Some(spec) = build_chart(records, chart_id) else {
            bail!(
                "unknown chart id: {chart_id} (expected one of: {})",
                CHART_IDS.join(", ")
            );
        };
        specs.push(spec);
    }

    Ok(specs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::read_records;

    const SAMPLE_RECORDS: &str =
        include_str!("../../data/processed/ethiopia_fi_enriched_data.csv");

    fn sample_table() -> RecordTable {
        read_records(SAMPLE_RECORDS.as_bytes()).expect("sample records should load")
    }

    #[test]
    fn no_chart_ids_selects_whole_dashboard() {
        let specs = select_charts(&sample_table(), &[]).expect("dashboard should build");
        assert_eq!(specs.len(), CHART_IDS.len());
    }

    #[test]
    fn chart_ids_are_kept_in_request_order() {
        let ids = vec!["events-timeline".to_string(), "account-ownership-chart".to_string()];
        let specs = select_charts(&sample_table(), &ids).expect("charts should build");
        assert_eq!(specs[0].chart_id, "events-timeline");
        assert_eq!(specs[1].chart_id, "account-ownership-chart");
    }

    #[test]
    fn unknown_chart_id_is_an_error() {
        let ids = vec!["revenue-chart".to_string()];
        let error = select_charts(&sample_table(), &ids).expect_err("unknown id should fail");
        assert!(error.to_string().contains("unknown chart id: revenue-chart"));
    }
}
