use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const GENDER_AVERAGE_TOLERANCE: f64 = 0.10;
pub const MOBILE_PENETRATION_MIN: f64 = 0.30;
pub const SMARTPHONE_PENETRATION_MIN: f64 = 0.10;
pub const FOUR_G_COVERAGE_MIN: f64 = 0.20;
pub const LAG_MONTHS_MAX: f64 = 60.0;
pub const ACCOUNT_OWNERSHIP_MIN_POINTS: usize = 5;
pub const LEGACY_ROW_BASELINE: usize = 18;
pub const MIN_DISTINCT_SOURCES: usize = 3;
pub const HIGH_MEDIUM_CONFIDENCE_MIN_SHARE: f64 = 0.70;

pub const REQUIRED_YEARS: [i32; 5] = [2011, 2014, 2017, 2021, 2024];
pub const REQUIRED_EVENT_CODES: [&str; 4] = [
    "telebirr_launch",
    "mpesa_launch",
    "safaricom_entry",
    "nfis_ii_launch",
];
pub const ENRICHMENT_CODES: [&str; 7] = [
    "infra_mobile_penetration",
    "infra_4g_coverage",
    "infra_smartphone_penetration",
    "access_account_male",
    "access_account_female",
    "policy_mm_regulation",
    "infra_4g_launch",
];
pub const REPUTABLE_SOURCES: [&str; 5] = [
    "Global Findex",
    "National Bank of Ethiopia",
    "Ethio Telecom",
    "Ethiopia Communication Authority",
    "GSMA Mobile Economy",
];

/// Thresholds and fixed lists the rule battery checks against.
///
/// Every field has a default, so a config file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    pub gender_average_tolerance: f64,
    pub mobile_penetration_min: f64,
    pub smartphone_penetration_min: f64,
    pub four_g_coverage_min: f64,
    pub lag_months_max: f64,
    pub account_ownership_min_points: usize,
    pub required_years: Vec<i32>,
    pub required_event_codes: Vec<String>,
    pub enrichment_codes: Vec<String>,
    pub legacy_row_baseline: usize,
    pub min_distinct_sources: usize,
    pub reputable_sources: Vec<String>,
    pub high_medium_confidence_min_share: f64,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            gender_average_tolerance: GENDER_AVERAGE_TOLERANCE,
            mobile_penetration_min: MOBILE_PENETRATION_MIN,
            smartphone_penetration_min: SMARTPHONE_PENETRATION_MIN,
            four_g_coverage_min: FOUR_G_COVERAGE_MIN,
            lag_months_max: LAG_MONTHS_MAX,
            account_ownership_min_points: ACCOUNT_OWNERSHIP_MIN_POINTS,
            required_years: REQUIRED_YEARS.to_vec(),
            required_event_codes: to_strings(&REQUIRED_EVENT_CODES),
            enrichment_codes: to_strings(&ENRICHMENT_CODES),
            legacy_row_baseline: LEGACY_ROW_BASELINE,
            min_distinct_sources: MIN_DISTINCT_SOURCES,
            reputable_sources: to_strings(&REPUTABLE_SOURCES),
            high_medium_confidence_min_share: HIGH_MEDIUM_CONFIDENCE_MIN_SHARE,
        }
    }
}

pub fn load_validation_config(path: Option<&Path>) -> Result<ValidationConfig> {
    let Some(path) = path else {
        return Ok(ValidationConfig::default());
    };

    let raw = fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let config: ValidationConfig = serde_json::from_slice(&raw)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults_for_absent_keys() {
        let raw = r#"
        {
          "gender_average_tolerance": 0.05,
          "required_years": [2021, 2024]
        }
        "#;

        let config: ValidationConfig =
            serde_json::from_str(raw).expect("partial config should deserialize");
        assert_eq!(config.gender_average_tolerance, 0.05);
        assert_eq!(config.required_years, vec![2021, 2024]);
        assert_eq!(config.mobile_penetration_min, MOBILE_PENETRATION_MIN);
        assert_eq!(config.reputable_sources.len(), REPUTABLE_SOURCES.len());
        assert_eq!(config.legacy_row_baseline, 18);
    }

    #[test]
    fn missing_config_path_yields_defaults() {
        let config = load_validation_config(None).expect("defaults should load");
        assert_eq!(config, ValidationConfig::default());
    }

    #[test]
    fn unreadable_config_path_is_an_error() {
        let path = Path::new("does/not/exist/validation.json");
        let error = load_validation_config(Some(path)).expect_err("missing file should fail");
        assert!(error.to_string().contains("validation.json"));
    }
}
