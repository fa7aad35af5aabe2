//! Chart projections for the dashboard: table in, chart spec out.

use serde::Serialize;

use crate::model::{RECORD_TYPE_EVENT, RECORD_TYPE_OBSERVATION, Record, RecordTable};
use crate::validation::ACCOUNT_OWNERSHIP_CODE;

pub const ACCOUNT_OWNERSHIP_CHART: &str = "account-ownership-chart";
pub const DIGITAL_PAYMENT_CHART: &str = "digital-payment-chart";
pub const EVENTS_TIMELINE_CHART: &str = "events-timeline";

pub const CHART_IDS: [&str; 3] = [
    ACCOUNT_OWNERSHIP_CHART,
    DIGITAL_PAYMENT_CHART,
    EVENTS_TIMELINE_CHART,
];

const USAGE_PILLAR: &str = "usage";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Timeline,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub chart_id: String,
    pub title: String,
    pub kind: ChartKind,
    pub series: Vec<ChartSeries>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub points: Vec<ChartPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,
    pub label: String,
}

/// Builds the spec for one chart id, or `None` for an unknown id.
pub fn build_chart(table: &RecordTable, chart_id: &str) -> Option<ChartSpec> {
    match chart_id {
        ACCOUNT_OWNERSHIP_CHART => Some(account_ownership_chart(table)),
        DIGITAL_PAYMENT_CHART => Some(digital_payment_chart(table)),
        EVENTS_TIMELINE_CHART => Some(events_timeline(table)),
        _ => None,
    }
}

pub fn build_dashboard(table: &RecordTable) -> Vec<ChartSpec> {
    CHART_IDS
        .iter()
        .filter_map(|chart_id| build_chart(table, chart_id))
        .collect()
}

fn account_ownership_chart(table: &RecordTable) -> ChartSpec {
    let rows = observations(table)
        .filter(|record| record.indicator_code == ACCOUNT_OWNERSHIP_CODE)
        .collect::<Vec<&Record>>();

    ChartSpec {
        chart_id: ACCOUNT_OWNERSHIP_CHART.to_string(),
        title: "Account Ownership (2011-2024)".to_string(),
        kind: ChartKind::Line,
        series: vec![value_series(ACCOUNT_OWNERSHIP_CODE, rows)],
    }
}

fn digital_payment_chart(table: &RecordTable) -> ChartSpec {
    let mut codes = Vec::<&str>::new();
    for record in observations(table).filter(|record| record.pillar == USAGE_PILLAR) {
        if !codes.contains(&record.indicator_code.as_str()) {
            codes.push(record.indicator_code.as_str());
        }
    }

    let series = codes
        .into_iter()
        .map(|code| {
            let rows = observations(table)
                .filter(|record| record.pillar == USAGE_PILLAR && record.indicator_code == code)
                .collect::<Vec<&Record>>();
            value_series(code, rows)
        })
        .collect();

    ChartSpec {
        chart_id: DIGITAL_PAYMENT_CHART.to_string(),
        title: "Digital Payment Adoption (2014-2024)".to_string(),
        kind: ChartKind::Line,
        series,
    }
}

fn events_timeline(table: &RecordTable) -> ChartSpec {
    let mut events = table
        .records
        .iter()
        .filter(|record| record.is_type(RECORD_TYPE_EVENT))
        .collect::<Vec<&Record>>();
    events.sort_by(|left, right| left.observation_date.cmp(&right.observation_date));

    let points = events
        .into_iter()
        .map(|record| ChartPoint {
            date: record.observation_date.clone(),
            value: None,
            label: if record.indicator.is_empty() {
                record.indicator_code.clone()
            } else {
                record.indicator.clone()
            },
        })
        .collect();

    ChartSpec {
        chart_id: EVENTS_TIMELINE_CHART.to_string(),
        title: "Financial Inclusion Events".to_string(),
        kind: ChartKind::Timeline,
        series: vec![ChartSeries {
            name: "events".to_string(),
            points,
        }],
    }
}

fn observations(table: &RecordTable) -> impl Iterator<Item = &Record> {
    table
        .records
        .iter()
        .filter(|record| record.is_type(RECORD_TYPE_OBSERVATION))
}

/// Date-sorted points for rows that carry a value.
fn value_series(name: &str, mut rows: Vec<&Record>) -> ChartSeries {
    rows.sort_by(|left, right| left.observation_date.cmp(&right.observation_date));

    let points = rows
        .into_iter()
        .filter_map(|record| {
            let value = record.value_numeric.value()?;
            Some(ChartPoint {
                date: record.observation_date.clone(),
                value: Some(value),
                label: record.record_id.clone(),
            })
        })
        .collect();

    ChartSeries {
        name: name.to_string(),
        points,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::read_records;
    use crate::model::NumericCell;

    const SAMPLE_RECORDS: &str = include_str!("../data/processed/ethiopia_fi_enriched_data.csv");

    fn sample_table() -> RecordTable {
        read_records(SAMPLE_RECORDS.as_bytes()).expect("sample records should load")
    }

    #[test]
    fn dashboard_builds_one_spec_per_chart_id() {
        let specs = build_dashboard(&sample_table());
        let ids = specs
            .iter()
            .map(|spec| spec.chart_id.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(ids, CHART_IDS.to_vec());
    }

    #[test]
    fn unknown_chart_id_yields_none() {
        assert!(build_chart(&sample_table(), "revenue-chart").is_none());
    }

    #[test]
    fn account_ownership_points_are_date_sorted_and_skip_missing_values() {
        let mut table = sample_table();
        table.records.reverse();
        if let Some(record) = table
            .records
            .iter_mut()
            .find(|record| record.record_id == "REC_0003")
        {
            record.value_numeric = NumericCell::Missing;
        }

        let spec = build_chart(&table, ACCOUNT_OWNERSHIP_CHART).expect("known chart id");
        assert_eq!(spec.kind, ChartKind::Line);
        let points = &spec.series[0].points;
        let dates = points
            .iter()
            .map(|point| point.date.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(
            dates,
            vec!["2011-12-31", "2014-12-31", "2021-12-31", "2024-11-29"]
        );
        assert_eq!(points[0].value, Some(0.14));
    }

    #[test]
    fn digital_payment_chart_groups_usage_indicators() {
        let spec = build_chart(&sample_table(), DIGITAL_PAYMENT_CHART).expect("known chart id");
        let names = spec
            .series
            .iter()
            .map(|series| series.name.as_str())
            .collect::<Vec<&str>>();
        assert_eq!(names, vec!["usage_digital_payment", "usage_mm_account"]);
        assert_eq!(spec.series[0].points.len(), 2);
    }

    #[test]
    fn events_timeline_is_ordered_by_date() {
        let spec = build_chart(&sample_table(), EVENTS_TIMELINE_CHART).expect("known chart id");
        assert_eq!(spec.kind, ChartKind::Timeline);
        let points = &spec.series[0].points;
        assert_eq!(points.len(), 6);
        assert_eq!(points[0].label, "Mobile Money Directive");
        assert_eq!(points[5].label, "M-Pesa Ethiopia Launch");
        assert!(points.iter().all(|point| point.value.is_none()));
    }
}
