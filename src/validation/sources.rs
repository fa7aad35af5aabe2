use super::*;

pub fn check_source_diversity(context: &RuleContext) -> RuleOutcome {
    let distinct = context
        .records()
        .iter()
        .filter(|record| !record.is_blank("source_name"))
        .map(|record| record.source_name.as_str())
        .collect::<HashSet<&str>>()
        .len();
    let minimum = context.config.min_distinct_sources;
    if distinct >= minimum {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Completeness,
        format!("found {distinct} distinct source(s), need at least {minimum}"),
    ))
}

pub fn check_reputable_sources(context: &RuleContext) -> RuleOutcome {
    let names = context
        .records()
        .iter()
        .map(|record| record.source_name.as_str())
        .collect::<HashSet<&str>>();

    let missing = context
        .config
        .reputable_sources
        .iter()
        .filter(|source| !names.contains(source.as_str()))
        .cloned()
        .collect::<Vec<String>>();

    if missing.is_empty() {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Completeness,
        format!("missing reputable source(s): {}", missing.join(", ")),
    ))
}

pub fn check_high_confidence_present(context: &RuleContext) -> RuleOutcome {
    if context
        .records()
        .iter()
        .any(|record| record.confidence == HIGH_CONFIDENCE)
    {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Completeness,
        format!("no row has confidence={HIGH_CONFIDENCE}"),
    ))
}

pub fn check_confidence_share(context: &RuleContext) -> RuleOutcome {
    let total = context.table.len();
    let confident = context
        .records()
        .iter()
        .filter(|record| {
            record.confidence == HIGH_CONFIDENCE || record.confidence == MEDIUM_CONFIDENCE
        })
        .count();
    let minimum = context.config.high_medium_confidence_min_share;

    let Some(share) = ratio(confident, total) else {
        return Err(Violation::new(
            FailureKind::Completeness,
            format!("0 of 0 rows have high or medium confidence, need more than {minimum}"),
        ));
    };

    if share > minimum {
        return Ok(());
    }

    Err(Violation::new(
        FailureKind::Range,
        format!(
            "{confident} of {total} rows ({:.1}%) have high or medium confidence, need more than {:.1}%",
            share * 100.0,
            minimum * 100.0
        ),
    ))
}
