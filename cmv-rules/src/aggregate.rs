//! Aggregation of one dispatcher run
//!
//! Score = 1 - (weight of failed rules) / (weight of all rules), or 0 when
//! no rule was installed. A rule fails iff it produced at least one issue.

use crate::rule::RuleResult;
use cmv_common::{Issue, Severity};
use serde::Serialize;

/// Issue counts bucketed by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub error: usize,
    pub warning: usize,
    pub info: usize,
}

impl SeverityCounts {
    pub fn from_issues(issues: &[Issue]) -> Self {
        let mut counts = Self::default();
        for issue in issues {
            match issue.severity {
                Severity::Error => counts.error += 1,
                Severity::Warning => counts.warning += 1,
                Severity::Info => counts.info += 1,
            }
        }
        counts
    }

    pub fn get(&self, severity: Severity) -> usize {
        match severity {
            Severity::Error => self.error,
            Severity::Warning => self.warning,
            Severity::Info => self.info,
        }
    }

    pub fn total(&self) -> usize {
        self.error + self.warning + self.info
    }
}

/// Everything one check produced
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// One entry per installed rule, in registration order
    pub results: Vec<RuleResult>,
    /// All issues in dispatch order
    pub issues: Vec<Issue>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub counts: SeverityCounts,
    /// Improvement score in [0, 1]
    pub score: f64,
}

impl ValidationResult {
    pub fn new(results: Vec<RuleResult>, issues: Vec<Issue>) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed()).count();
        let counts = SeverityCounts::from_issues(&issues);
        let score = calculate_score(&results);

        Self {
            results,
            issues,
            total,
            passed,
            failed: total - passed,
            counts,
            score,
        }
    }

    /// First result for the given rule id
    pub fn result(&self, rule_id: &str) -> Option<&RuleResult> {
        self.results.iter().find(|r| r.metadata.id == rule_id)
    }

    /// Issues at or above a severity, in dispatch order
    pub fn issues_at_least(&self, severity: Severity) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.severity >= severity)
    }

    pub fn issues_for_rule<'a>(&'a self, rule_id: &'a str) -> impl Iterator<Item = &'a Issue> {
        self.issues.iter().filter(move |i| i.rule_id == rule_id)
    }

    pub fn highest_severity(&self) -> Option<Severity> {
        self.issues.iter().map(|i| i.severity).max()
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

/// Weighted fraction of rules that passed
pub fn calculate_score(results: &[RuleResult]) -> f64 {
    let total_weight: f64 = results.iter().map(|r| r.metadata.weight).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }

    let failed_weight: f64 = results
        .iter()
        .filter(|r| !r.passed())
        .map(|r| r.metadata.weight)
        .sum();

    (1.0 - failed_weight / total_weight).clamp(0.0, 1.0)
}
