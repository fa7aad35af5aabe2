use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleCategory {
    Schema,
    ReferentialIntegrity,
    RecordType,
    Consistency,
    Plausibility,
    Completeness,
    SourceQuality,
    Missingness,
}

impl RuleCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::ReferentialIntegrity => "referential_integrity",
            Self::RecordType => "record_type",
            Self::Consistency => "consistency",
            Self::Plausibility => "plausibility",
            Self::Completeness => "completeness",
            Self::SourceQuality => "source_quality",
            Self::Missingness => "missingness",
        }
    }
}

/// One independently evaluated predicate over the records table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    RequiredColumns,
    RecordTypeCodes,
    PillarCodes,
    ConfidenceCodes,
    ObservationValue,
    ObservationDate,
    ObservationSourceName,
    ObservationSourceUrl,
    EventPillarEmpty,
    EventValueAbsent,
    EventDate,
    EventSourceName,
    EventSourceUrl,
    ImpactLinkValueAbsent,
    ImpactLinkMagnitude,
    ImpactLinkLag,
    ImpactLinkPositiveDirection,
    IndicatorCodeMapping,
    RecordIdUnique,
    GenderAverage,
    MaleExceedsFemale,
    MobileExceedsSmartphone,
    MobilePenetration,
    SmartphonePenetration,
    FourGCoverage,
    AccountOwnershipSeries,
    RequiredYears,
    RequiredEvents,
    EnrichmentCodes,
    RowCountBaseline,
    SourceDiversity,
    ReputableSources,
    HighConfidencePresent,
    ConfidenceShare,
    ValueMissingByDesign,
}

const OBSERVATION_LOOKUP_COLUMNS: &[&str] = &["record_type", "indicator_code", "value_numeric"];
const DATED_OBSERVATION_COLUMNS: &[&str] = &[
    "record_type",
    "indicator_code",
    "value_numeric",
    "observation_date",
];

impl Rule {
    pub const ALL: [Rule; 35] = [
        Rule::RequiredColumns,
        Rule::RecordTypeCodes,
        Rule::PillarCodes,
        Rule::ConfidenceCodes,
        Rule::ObservationValue,
        Rule::ObservationDate,
        Rule::ObservationSourceName,
        Rule::ObservationSourceUrl,
        Rule::EventPillarEmpty,
        Rule::EventValueAbsent,
        Rule::EventDate,
        Rule::EventSourceName,
        Rule::EventSourceUrl,
        Rule::ImpactLinkValueAbsent,
        Rule::ImpactLinkMagnitude,
        Rule::ImpactLinkLag,
        Rule::ImpactLinkPositiveDirection,
        Rule::IndicatorCodeMapping,
        Rule::RecordIdUnique,
        Rule::GenderAverage,
        Rule::MaleExceedsFemale,
        Rule::MobileExceedsSmartphone,
        Rule::MobilePenetration,
        Rule::SmartphonePenetration,
        Rule::FourGCoverage,
        Rule::AccountOwnershipSeries,
        Rule::RequiredYears,
        Rule::RequiredEvents,
        Rule::EnrichmentCodes,
        Rule::RowCountBaseline,
        Rule::SourceDiversity,
        Rule::ReputableSources,
        Rule::HighConfidencePresent,
        Rule::ConfidenceShare,
        Rule::ValueMissingByDesign,
    ];

    /// Stable `R-NNN` id derived from the rule's position in the battery.
    pub fn check_id(self) -> String {
        let position = Self::ALL
            .iter()
            .position(|rule| *rule == self)
            .unwrap_or(Self::ALL.len());
        format!("R-{:03}", position + 1)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::RequiredColumns => "schema.required_columns",
            Self::RecordTypeCodes => "reference.record_type",
            Self::PillarCodes => "reference.pillar",
            Self::ConfidenceCodes => "reference.confidence",
            Self::ObservationValue => "observation.value_numeric",
            Self::ObservationDate => "observation.observation_date",
            Self::ObservationSourceName => "observation.source_name",
            Self::ObservationSourceUrl => "observation.source_url",
            Self::EventPillarEmpty => "event.pillar_empty",
            Self::EventValueAbsent => "event.value_numeric_absent",
            Self::EventDate => "event.observation_date",
            Self::EventSourceName => "event.source_name",
            Self::EventSourceUrl => "event.source_url",
            Self::ImpactLinkValueAbsent => "impact_link.value_numeric_absent",
            Self::ImpactLinkMagnitude => "impact_link.impact_magnitude",
            Self::ImpactLinkLag => "impact_link.lag_months",
            Self::ImpactLinkPositiveDirection => "impact_link.positive_direction",
            Self::IndicatorCodeMapping => "consistency.indicator_code_mapping",
            Self::RecordIdUnique => "consistency.record_id_unique",
            Self::GenderAverage => "consistency.gender_average",
            Self::MaleExceedsFemale => "consistency.male_exceeds_female",
            Self::MobileExceedsSmartphone => "consistency.mobile_exceeds_smartphone",
            Self::MobilePenetration => "plausibility.mobile_penetration",
            Self::SmartphonePenetration => "plausibility.smartphone_penetration",
            Self::FourGCoverage => "plausibility.four_g_coverage",
            Self::AccountOwnershipSeries => "plausibility.account_ownership_series",
            Self::RequiredYears => "completeness.required_years",
            Self::RequiredEvents => "completeness.required_events",
            Self::EnrichmentCodes => "completeness.enrichment_codes",
            Self::RowCountBaseline => "completeness.row_count_baseline",
            Self::SourceDiversity => "sources.diversity",
            Self::ReputableSources => "sources.reputable",
            Self::HighConfidencePresent => "sources.high_confidence_present",
            Self::ConfidenceShare => "sources.confidence_share",
            Self::ValueMissingByDesign => "missingness.value_numeric_by_design",
        }
    }

    pub fn category(self) -> RuleCategory {
        match self {
            Self::RequiredColumns => RuleCategory::Schema,
            Self::RecordTypeCodes | Self::PillarCodes | Self::ConfidenceCodes => {
                RuleCategory::ReferentialIntegrity
            }
            Self::ObservationValue
            | Self::ObservationDate
            | Self::ObservationSourceName
            | Self::ObservationSourceUrl
            | Self::EventPillarEmpty
            | Self::EventValueAbsent
            | Self::EventDate
            | Self::EventSourceName
            | Self::EventSourceUrl
            | Self::ImpactLinkValueAbsent
            | Self::ImpactLinkMagnitude
            | Self::ImpactLinkLag
            | Self::ImpactLinkPositiveDirection => RuleCategory::RecordType,
            Self::IndicatorCodeMapping
            | Self::RecordIdUnique
            | Self::GenderAverage
            | Self::MaleExceedsFemale
            | Self::MobileExceedsSmartphone => RuleCategory::Consistency,
            Self::MobilePenetration
            | Self::SmartphonePenetration
            | Self::FourGCoverage
            | Self::AccountOwnershipSeries => RuleCategory::Plausibility,
            Self::RequiredYears
            | Self::RequiredEvents
            | Self::EnrichmentCodes
            | Self::RowCountBaseline => RuleCategory::Completeness,
            Self::SourceDiversity
            | Self::ReputableSources
            | Self::HighConfidencePresent
            | Self::ConfidenceShare => RuleCategory::SourceQuality,
            Self::ValueMissingByDesign => RuleCategory::Missingness,
        }
    }

    /// Columns the rule reads. A rule whose columns are absent fails with a
    /// schema violation instead of being evaluated.
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::RequiredColumns | Self::RowCountBaseline => &[],
            Self::RecordTypeCodes => &["record_type"],
            Self::PillarCodes => &["pillar"],
            Self::ConfidenceCodes | Self::HighConfidencePresent | Self::ConfidenceShare => {
                &["confidence"]
            }
            Self::ObservationValue
            | Self::EventValueAbsent
            | Self::ImpactLinkValueAbsent
            | Self::ValueMissingByDesign => &["record_type", "value_numeric"],
            Self::ObservationDate | Self::EventDate | Self::RequiredYears => {
                &["record_type", "observation_date"]
            }
            Self::ObservationSourceName | Self::EventSourceName => &["record_type", "source_name"],
            Self::ObservationSourceUrl | Self::EventSourceUrl => &["record_type", "source_url"],
            Self::EventPillarEmpty => &["record_type", "pillar"],
            Self::ImpactLinkMagnitude => &["record_type", "impact_magnitude"],
            Self::ImpactLinkLag => &["record_type", "lag_months"],
            Self::ImpactLinkPositiveDirection => &["record_type", "impact_direction"],
            Self::IndicatorCodeMapping => &["indicator", "indicator_code"],
            Self::RecordIdUnique => &["record_id"],
            Self::GenderAverage | Self::AccountOwnershipSeries => DATED_OBSERVATION_COLUMNS,
            Self::MaleExceedsFemale
            | Self::MobileExceedsSmartphone
            | Self::MobilePenetration
            | Self::SmartphonePenetration
            | Self::FourGCoverage => OBSERVATION_LOOKUP_COLUMNS,
            Self::RequiredEvents => &["record_type", "indicator_code"],
            Self::EnrichmentCodes => &["indicator_code"],
            Self::SourceDiversity | Self::ReputableSources => &["source_name"],
        }
    }

    pub fn evaluate(self, context: &RuleContext) -> RuleResult {
        let outcome = context
            .require_columns(self.columns())
            .and_then(|()| self.check(context));
        RuleResult::from_outcome(self, outcome)
    }

    fn check(self, context: &RuleContext) -> RuleOutcome {
        let config = context.config;
        match self {
            Self::RequiredColumns => check_required_columns(context),
            Self::RecordTypeCodes => check_reference_field(context, "record_type", false),
            Self::PillarCodes => check_reference_field(context, "pillar", true),
            Self::ConfidenceCodes => check_reference_field(context, "confidence", false),
            Self::ObservationValue => check_bounded_values(
                context,
                RECORD_TYPE_OBSERVATION,
                "value_numeric",
                0.0,
                1.0,
            ),
            Self::ObservationDate => check_dates(context, RECORD_TYPE_OBSERVATION),
            Self::ObservationSourceName => {
                check_present(context, RECORD_TYPE_OBSERVATION, "source_name")
            }
            Self::ObservationSourceUrl => check_source_urls(context, RECORD_TYPE_OBSERVATION),
            Self::EventPillarEmpty => check_event_pillar_empty(context),
            Self::EventValueAbsent => check_value_absent(context, RECORD_TYPE_EVENT),
            Self::EventDate => check_present(context, RECORD_TYPE_EVENT, "observation_date"),
            Self::EventSourceName => check_present(context, RECORD_TYPE_EVENT, "source_name"),
            Self::EventSourceUrl => check_source_urls(context, RECORD_TYPE_EVENT),
            Self::ImpactLinkValueAbsent => check_value_absent(context, RECORD_TYPE_IMPACT_LINK),
            Self::ImpactLinkMagnitude => check_bounded_values(
                context,
                RECORD_TYPE_IMPACT_LINK,
                "impact_magnitude",
                0.0,
                1.0,
            ),
            Self::ImpactLinkLag => check_bounded_values(
                context,
                RECORD_TYPE_IMPACT_LINK,
                "lag_months",
                0.0,
                config.lag_months_max,
            ),
            Self::ImpactLinkPositiveDirection => check_positive_direction(context),
            Self::IndicatorCodeMapping => check_indicator_code_mapping(context),
            Self::RecordIdUnique => check_record_id_unique(context),
            Self::GenderAverage => check_gender_average(context),
            Self::MaleExceedsFemale => check_exceeds(context, ACCOUNT_MALE_CODE, ACCOUNT_FEMALE_CODE),
            Self::MobileExceedsSmartphone => {
                check_exceeds(context, MOBILE_PENETRATION_CODE, SMARTPHONE_PENETRATION_CODE)
            }
            Self::MobilePenetration => {
                check_minimum(context, MOBILE_PENETRATION_CODE, config.mobile_penetration_min)
            }
            Self::SmartphonePenetration => check_minimum(
                context,
                SMARTPHONE_PENETRATION_CODE,
                config.smartphone_penetration_min,
            ),
            Self::FourGCoverage => {
                check_minimum(context, FOUR_G_COVERAGE_CODE, config.four_g_coverage_min)
            }
            Self::AccountOwnershipSeries => check_account_ownership_series(context),
            Self::RequiredYears => check_required_years(context),
            Self::RequiredEvents => check_required_events(context),
            Self::EnrichmentCodes => check_enrichment_codes(context),
            Self::RowCountBaseline => check_row_count_baseline(context),
            Self::SourceDiversity => check_source_diversity(context),
            Self::ReputableSources => check_reputable_sources(context),
            Self::HighConfidencePresent => check_high_confidence_present(context),
            Self::ConfidenceShare => check_confidence_share(context),
            Self::ValueMissingByDesign => check_value_missing_by_design(context),
        }
    }
}
