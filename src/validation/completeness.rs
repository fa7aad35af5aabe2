use super::*;

pub fn check_required_years(context: &RuleContext) -> RuleOutcome {
    let years = context
        .records_of_type(RECORD_TYPE_OBSERVATION)
        .into_iter()
        .filter_map(Record::observation_year)
        .collect::<HashSet<i32>>();

    let missing = context
        .config
        .required_years
        .iter()
        .filter(|year| !years.contains(*year))
        .map(|year| year.to_string())
        .collect::<Vec<String>>();

    if missing.is_empty() {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Completeness,
        format!("missing observation year(s): {}", missing.join(", ")),
    ))
}

pub fn check_required_events(context: &RuleContext) -> RuleOutcome {
    let event_codes = context
        .records_of_type(RECORD_TYPE_EVENT)
        .into_iter()
        .map(|record| record.indicator_code.as_str())
        .collect::<HashSet<&str>>();

    require_codes(
        &event_codes,
        &context.config.required_event_codes,
        "missing required event(s)",
    )
}

pub fn check_enrichment_codes(context: &RuleContext) -> RuleOutcome {
    let codes = context
        .records()
        .iter()
        .map(|record| record.indicator_code.as_str())
        .collect::<HashSet<&str>>();

    require_codes(
        &codes,
        &context.config.enrichment_codes,
        "missing enrichment code(s)",
    )
}

pub fn check_row_count_baseline(context: &RuleContext) -> RuleOutcome {
    let rows = context.table.len();
    let baseline = context.config.legacy_row_baseline;
    if rows > baseline {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Completeness,
        format!("found {rows} row(s), expected more than {baseline}"),
    ))
}

fn require_codes(present: &HashSet<&str>, required: &[String], problem: &str) -> RuleOutcome {
    let missing = required
        .iter()
        .filter(|code| !present.contains(code.as_str()))
        .cloned()
        .collect::<Vec<String>>();

    if missing.is_empty() {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Completeness,
        format!("{problem}: {}", missing.join(", ")),
    ))
}
