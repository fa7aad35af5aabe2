use super::*;

pub fn check_minimum(context: &RuleContext, indicator_code: &str, minimum: f64) -> RuleOutcome {
    let Some(record) = context.first_observation(indicator_code) else {
        return Err(Violation::new(
            FailureKind::Completeness,
            format!("no {indicator_code} observation"),
        ));
    };

    match &record.value_numeric {
        NumericCell::Value(value) if *value > minimum => Ok(()),
        NumericCell::Value(value) => Err(Violation::new(
            FailureKind::Range,
            format!(
                "{indicator_code} value {value} ({}) should exceed {minimum}",
                record.label()
            ),
        )),
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

/// The account-ownership series needs enough points, all within `[0, 1]`,
/// and its chronologically last value must exceed its first.
pub fn check_account_ownership_series(context: &RuleContext) -> RuleOutcome {
    let mut series = context.observations_for(ACCOUNT_OWNERSHIP_CODE);
    let min_points = context.config.account_ownership_min_points;
    if series.len() < min_points {
        return Err(Violation::new(
            FailureKind::Completeness,
            format!(
                "found {} {ACCOUNT_OWNERSHIP_CODE} observation(s), need at least {min_points}",
                series.len()
            ),
        ));
    }

    let out_of_range = series
        .iter()
        .filter(|record| {
            !record
                .value_numeric
                .value()
                .is_some_and(|value| (0.0..=1.0).contains(&value))
        })
        .map(|record| record.label())
        .collect::<Vec<String>>();
    if !out_of_range.is_empty() {
        return Err(Violation::new(
            FailureKind::Range,
            format!(
                "{ACCOUNT_OWNERSHIP_CODE} values missing or outside [0, 1]: {}",
                format_labels(&out_of_range)
            ),
        ));
    }

    series.sort_by(|left, right| left.observation_date.cmp(&right.observation_date));
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return Ok(());
    };
    let (Some(first_value), Some(last_value)) =
        (first.value_numeric.value(), last.value_numeric.value())
    else {
        return Ok(());
    };

    if last_value > first_value {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Consistency,
        format!(
            "{ACCOUNT_OWNERSHIP_CODE} shows no growth: {first_value} on {} to {last_value} on {}",
            display_value(&first.observation_date),
            display_value(&last.observation_date)
        ),
    ))
}
