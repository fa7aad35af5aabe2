use super::*;

pub fn check_required_columns(context: &RuleContext) -> RuleOutcome {
    let missing = context.table.missing_columns(&REQUIRED_COLUMNS);
    if missing.is_empty() {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Schema,
        format!("missing required column(s): {}", missing.join(", ")),
    ))
}
