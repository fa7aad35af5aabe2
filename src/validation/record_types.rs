use super::*;

/// Requires `column` to hold a number within `[min, max]` on every row of the
/// given record type. Out-of-range or non-numeric cells take precedence over
/// missing ones when choosing the failure kind.
pub fn check_bounded_values(
    context: &RuleContext,
    record_type: &str,
    column: &str,
    min: f64,
    max: f64,
) -> RuleOutcome {
    let mut missing = Vec::<String>::new();
    let mut out_of_range = Vec::<String>::new();

    for record in context.records_of_type(record_type) {
        match record.numeric(column) {
            NumericCell::Missing => missing.push(record.label()),
            NumericCell::Value(value) if (min..=max).contains(value) => {}
            NumericCell::Value(value) => out_of_range.push(format!("{}={value}", record.label())),
            NumericCell::Invalid(raw) => out_of_range.push(format!("{}={raw:?}", record.label())),
        }
    }

    if !out_of_range.is_empty() {
        let mut message = format!(
            "{record_type} {column} outside [{min}, {max}]: {}",
            format_labels(&out_of_range)
        );
        if !missing.is_empty() {
            message.push_str(&format!("; missing: {}", format_labels(&missing)));
        }
        return Err(Violation::new(FailureKind::Range, message));
    }

    if !missing.is_empty() {
        return Err(Violation::new(
            FailureKind::Completeness,
            format!("{record_type} {column} missing: {}", format_labels(&missing)),
        ));
    }

    Ok(())
}

pub fn check_present(context: &RuleContext, record_type: &str, column: &str) -> RuleOutcome {
    let missing = context
        .records_of_type(record_type)
        .into_iter()
        .filter(|record| record.is_blank(column))
        .map(Record::label)
        .collect::<Vec<String>>();

    if missing.is_empty() {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Completeness,
        format!("{record_type} {column} missing: {}", format_labels(&missing)),
    ))
}

pub fn check_dates(context: &RuleContext, record_type: &str) -> RuleOutcome {
    check_present(context, record_type, "observation_date")?;
    check_pattern(
        context,
        record_type,
        "observation_date",
        &DATE_PATTERN,
        "not in YYYY-MM-DD format",
    )
}

pub fn check_source_urls(context: &RuleContext, record_type: &str) -> RuleOutcome {
    check_present(context, record_type, "source_url")?;
    check_pattern(
        context,
        record_type,
        "source_url",
        &URL_PATTERN,
        "not an http(s) URL",
    )
}

fn check_pattern(
    context: &RuleContext,
    record_type: &str,
    column: &str,
    pattern: &Regex,
    problem: &str,
) -> RuleOutcome {
    let malformed = context
        .records_of_type(record_type)
        .into_iter()
        .filter(|record| !pattern.is_match(record.text(column)))
        .map(|record| format!("{}={:?}", record.label(), record.text(column)))
        .collect::<Vec<String>>();

    if malformed.is_empty() {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Range,
        format!("{record_type} {column} {problem}: {}", format_labels(&malformed)),
    ))
}

pub fn check_event_pillar_empty(context: &RuleContext) -> RuleOutcome {
    let offending = context
        .records_of_type(RECORD_TYPE_EVENT)
        .into_iter()
        .filter(|record| !record.is_blank("pillar"))
        .map(|record| format!("{}={}", record.label(), record.pillar))
        .collect::<Vec<String>>();

    if offending.is_empty() {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Consistency,
        format!("event pillar should be empty: {}", format_labels(&offending)),
    ))
}

pub fn check_value_absent(context: &RuleContext, record_type: &str) -> RuleOutcome {
    let offending = context
        .records_of_type(record_type)
        .into_iter()
        .filter(|record| !record.value_numeric.is_missing())
        .map(Record::label)
        .collect::<Vec<String>>();

    if offending.is_empty() {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Consistency,
        format!(
            "{record_type} value_numeric should be empty: {}",
            format_labels(&offending)
        ),
    ))
}

pub fn check_positive_direction(context: &RuleContext) -> RuleOutcome {
    let impact_links = context.records_of_type(RECORD_TYPE_IMPACT_LINK);
    if impact_links
        .iter()
        .any(|record| record.impact_direction == POSITIVE_DIRECTION)
    {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Completeness,
        format!(
            "no impact link has impact_direction={POSITIVE_DIRECTION} ({} impact link(s))",
            impact_links.len()
        ),
    ))
}
