use super::*;

/// Checks every distinct value of `field` against the reference codes of the
/// same field name. Invalid values are reported in first-seen order.
pub fn check_reference_field(context: &RuleContext, field: &str, allow_empty: bool) -> RuleOutcome {
    let mut seen = HashSet::<&str>::new();
    let mut invalid = Vec::<String>::new();

    for record in context.records() {
        let value = record.text(field);
        if (allow_empty && record.is_blank(field)) || !seen.insert(value) {
            continue;
        }
        if !context.allow_lists.permits(field, value) {
            invalid.push(display_value(value).to_string());
        }
    }

    if invalid.is_empty() {
        return Ok(());
    }

    let permitted = context.allow_lists.codes_for(field);
    Err(Violation::new(
        FailureKind::ReferentialIntegrity,
        format!(
            "invalid {field} value(s): {} (permitted: {})",
            format_labels(&invalid),
            if permitted.is_empty() {
                "none".to_string()
            } else {
                permitted.join(", ")
            }
        ),
    ))
}
