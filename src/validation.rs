use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::config::ValidationConfig;
use crate::model::{
    AllowLists, NumericCell, REQUIRED_COLUMNS, RECORD_TYPE_EVENT, RECORD_TYPE_IMPACT_LINK,
    RECORD_TYPE_OBSERVATION, Record, RecordTable, ReferenceCode,
};
use crate::util::parse_date_prefix;

mod completeness;
mod consistency;
mod context;
mod missingness;
mod plausibility;
mod record_types;
mod referential;
mod report;
mod rules;
mod schema;
mod sources;

use self::completeness::*;
use self::consistency::*;
use self::context::*;
use self::missingness::*;
use self::plausibility::*;
use self::record_types::*;
use self::referential::*;
use self::schema::*;
use self::sources::*;

pub use self::report::{FailureKind, Report, ReportSummary, RuleResult};
pub use self::rules::{Rule, RuleCategory};

pub const ACCOUNT_OWNERSHIP_CODE: &str = "access_account_ownership";
pub const ACCOUNT_MALE_CODE: &str = "access_account_male";
pub const ACCOUNT_FEMALE_CODE: &str = "access_account_female";
pub const MOBILE_PENETRATION_CODE: &str = "infra_mobile_penetration";
pub const SMARTPHONE_PENETRATION_CODE: &str = "infra_smartphone_penetration";
pub const FOUR_G_COVERAGE_CODE: &str = "infra_4g_coverage";

const POSITIVE_DIRECTION: &str = "positive";
const HIGH_CONFIDENCE: &str = "high";
const MEDIUM_CONFIDENCE: &str = "medium";

static DATE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}").expect("date pattern should compile"));
static URL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://").expect("url pattern should compile"));

/// Runs the full rule battery with the default thresholds.
pub fn validate(records: &RecordTable, reference_codes: &[ReferenceCode]) -> Report {
    validate_with_config(records, reference_codes, &ValidationConfig::default())
}

/// Runs every rule against the same read-only inputs and collects one result
/// per rule, in battery order. A failing rule never stops the others.
pub fn validate_with_config(
    records: &RecordTable,
    reference_codes: &[ReferenceCode],
    config: &ValidationConfig,
) -> Report {
    let context = RuleContext::new(records, reference_codes, config);
    let results = Rule::ALL
        .iter()
        .map(|rule| rule.evaluate(&context))
        .collect::<Vec<RuleResult>>();

    Report { results }
}
