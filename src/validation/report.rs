use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Schema,
    ReferentialIntegrity,
    Range,
    Completeness,
    Consistency,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Schema => "schema",
            Self::ReferentialIntegrity => "referential_integrity",
            Self::Range => "range",
            Self::Completeness => "completeness",
            Self::Consistency => "consistency",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleResult {
    pub check_id: String,
    pub rule: String,
    pub category: RuleCategory,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_kind: Option<FailureKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl RuleResult {
    pub fn from_outcome(rule: Rule, outcome: RuleOutcome) -> Self {
        let (passed, failure_kind, message) = match outcome {
            Ok(()) => (true, None, None),
            Err(violation) => (false, Some(violation.kind), Some(violation.message)),
        };

        Self {
            check_id: rule.check_id(),
            rule: rule.name().to_string(),
            category: rule.category(),
            passed,
            failure_kind,
            message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_rules: usize,
    pub passed: usize,
    pub failed: usize,
}

/// Rule results in battery order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Report {
    pub results: Vec<RuleResult>,
}

impl Report {
    pub fn summary(&self) -> ReportSummary {
        let passed = self.results.iter().filter(|result| result.passed).count();
        ReportSummary {
            total_rules: self.results.len(),
            passed,
            failed: self.results.len() - passed,
        }
    }

    pub fn failures(&self) -> impl Iterator<Item = &RuleResult> {
        self.results.iter().filter(|result| !result.passed)
    }

    #[cfg(test)]
    pub fn result(&self, rule: &str) -> Option<&RuleResult> {
        self.results.iter().find(|result| result.rule == rule)
    }

    pub fn is_passing(&self) -> bool {
        self.results.iter().all(|result| result.passed)
    }

    pub fn status(&self) -> &'static str {
        if self.is_passing() { "passed" } else { "failed" }
    }
}
