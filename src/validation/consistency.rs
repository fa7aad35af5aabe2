use super::*;

/// Every indicator name must map to a single indicator code. Rows missing
/// either side are ignored.
pub fn check_indicator_code_mapping(context: &RuleContext) -> RuleOutcome {
    let mut order = Vec::<&str>::new();
    let mut codes_by_indicator = HashMap::<&str, Vec<&str>>::new();

    for record in context.records() {
        if record.is_blank("indicator") || record.is_blank("indicator_code") {
            continue;
        }

        let codes = codes_by_indicator
            .entry(record.indicator.as_str())
            .or_insert_with(|| {
                order.push(record.indicator.as_str());
                Vec::new()
            });
        if !codes.contains(&record.indicator_code.as_str()) {
            codes.push(record.indicator_code.as_str());
        }
    }

    let conflicts = order
        .iter()
        .filter_map(|indicator| {
            let codes = codes_by_indicator.get(indicator)?;
            (codes.len() > 1).then(|| format!("{indicator} -> {}", codes.join("|")))
        })
        .collect::<Vec<String>>();

    if conflicts.is_empty() {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Consistency,
        format!(
            "indicator(s) with multiple codes: {}",
            format_labels(&conflicts)
        ),
    ))
}

pub fn check_record_id_unique(context: &RuleContext) -> RuleOutcome {
    let mut order = Vec::<&str>::new();
    let mut counts = HashMap::<&str, usize>::new();
    let mut blank_rows = Vec::<String>::new();

    for record in context.records() {
        if record.record_id.is_empty() {
            blank_rows.push(record.label());
            continue;
        }
        let count = counts.entry(record.record_id.as_str()).or_insert(0);
        if *count == 0 {
            order.push(record.record_id.as_str());
        }
        *count += 1;
    }

    let duplicates = order
        .iter()
        .filter_map(|record_id| {
            let count = counts.get(record_id).copied().unwrap_or(0);
            (count > 1).then(|| format!("{record_id} x{count}"))
        })
        .collect::<Vec<String>>();

    let mut problems = Vec::<String>::new();
    if !duplicates.is_empty() {
        problems.push(format!(
            "duplicate record_id value(s): {}",
            format_labels(&duplicates)
        ));
    }
    if !blank_rows.is_empty() {
        problems.push(format!(
            "rows without record_id: {}",
            format_labels(&blank_rows)
        ));
    }

    if problems.is_empty() {
        return Ok(());
    }

    Err(Violation::new(FailureKind::Consistency, problems.join("; ")))
}

/// The latest overall account-ownership value must sit within the configured
/// absolute tolerance of the simple male/female average. Skipped unless all
/// three indicators have rows; a gender row without a value fails.
pub fn check_gender_average(context: &RuleContext) -> RuleOutcome {
    let latest_overall = context
        .observations_for(ACCOUNT_OWNERSHIP_CODE)
        .into_iter()
        .filter(|record| record.value_numeric.value().is_some())
        .max_by_key(|record| parse_date_prefix(&record.observation_date));
    let male = context.first_observation_value(ACCOUNT_MALE_CODE)?;
    let female = context.first_observation_value(ACCOUNT_FEMALE_CODE)?;

    let (Some(overall_record), Some(male), Some(female)) = (latest_overall, male, female) else {
        return Ok(());
    };
    let Some(overall) = overall_record.value_numeric.value() else {
        return Ok(());
    };

    let average = (male + female) / 2.0;
    let difference = (overall - average).abs();
    let tolerance = context.config.gender_average_tolerance;
    if difference < tolerance {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Consistency,
        format!(
            "overall account ownership {overall} ({}) differs from gender average {average:.3} by {difference:.3}, tolerance {tolerance}",
            overall_record.label()
        ),
    ))
}

/// The first-seen value of `higher_code` must exceed that of `lower_code`.
/// Skipped when either indicator has no row.
pub fn check_exceeds(context: &RuleContext, higher_code: &str, lower_code: &str) -> RuleOutcome {
    let higher = context.first_observation_value(higher_code)?;
    let lower = context.first_observation_value(lower_code)?;
    let (Some(higher), Some(lower)) = (higher, lower) else {
        return Ok(());
    };

    if higher > lower {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Consistency,
        format!("{higher_code} ({higher}) should exceed {lower_code} ({lower})"),
    ))
}
