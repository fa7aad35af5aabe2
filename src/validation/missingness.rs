use super::*;

const VALUELESS_RECORD_TYPES: [&str; 2] = [RECORD_TYPE_IMPACT_LINK, RECORD_TYPE_EVENT];

/// Events and impact links carry no measured value, so `value_numeric` is
/// expected to be missing on all of their rows.
pub fn check_value_missing_by_design(context: &RuleContext) -> RuleOutcome {
    let mut problems = Vec::<String>::new();

    for record_type in VALUELESS_RECORD_TYPES {
        let rows = context.records_of_type(record_type);
        let missing = rows
            .iter()
            .filter(|record| record.value_numeric.is_missing())
            .count();
        let Some(share) = ratio(missing, rows.len()) else {
            continue;
        };

        if missing < rows.len() {
            problems.push(format!(
                "{record_type} {missing}/{} missing ({:.1}%)",
                rows.len(),
                share * 100.0
            ));
        }
    }

    if problems.is_empty() {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Consistency,
        format!(
            "value_numeric should be missing on every row: {}",
            problems.join("; ")
        ),
    ))
}
