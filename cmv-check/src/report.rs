//! Report rendering and exit gate

use clap::ValueEnum;
use cmv_common::Severity;
use cmv_rules::{RuleMetadata, ValidationResult};
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One line per issue plus a summary
    Text,
    /// Serialized validation result
    Json,
}

/// Text report: issues at or above `min_severity`, then a summary line
pub fn render_text(result: &ValidationResult, min_severity: Severity) -> String {
    let mut out = String::new();
    for issue in result.issues_at_least(min_severity) {
        let _ = writeln!(out, "{}", issue);
    }
    let _ = writeln!(
        out,
        "{} rules, {} passed, {} failed; {} errors, {} warnings, {} info; score {:.2}",
        result.total,
        result.passed,
        result.failed,
        result.counts.error,
        result.counts.warning,
        result.counts.info,
        result.score
    );
    out
}

/// JSON report; issues below `min_severity` are dropped from the issue list
/// but still counted
pub fn render_json(result: &ValidationResult, min_severity: Severity) -> serde_json::Result<String> {
    let mut filtered = result.clone();
    filtered.issues.retain(|i| i.severity >= min_severity);
    serde_json::to_string_pretty(&filtered)
}

/// `--list-rules` table
pub fn render_rules(rules: &[RuleMetadata]) -> String {
    let width = rules.iter().map(|m| m.id.len()).max().unwrap_or(0);
    let mut out = String::new();
    for meta in rules {
        let _ = writeln!(
            out,
            "{:<width$}  {:<7}  {:.2}  {}",
            meta.id,
            meta.severity.as_str(),
            meta.weight,
            meta.name,
            width = width
        );
    }
    out
}

/// Why a check failed the exit gate
#[derive(Debug, Clone, PartialEq)]
pub enum GateFailure {
    /// Issues at or above the configured severity
    Severity { severity: Severity, count: usize },
    /// Score under the configured minimum
    Score { score: f64, min_score: f64 },
}

/// Failures of the exit gate; empty means the check passed
pub fn gate(result: &ValidationResult, fail_on: Severity, min_score: f64) -> Vec<GateFailure> {
    let mut failures = Vec::new();
    let count = result.issues_at_least(fail_on).count();
    if count > 0 {
        failures.push(GateFailure::Severity {
            severity: fail_on,
            count,
        });
    }
    if result.score < min_score {
        failures.push(GateFailure::Score {
            score: result.score,
            min_score,
        });
    }
    failures
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmv_common::{Album, Artist, FixedClock, Track};
    use cmv_rules::Engine;

    fn result() -> ValidationResult {
        let album = Album::new("BRAHMS: PIANO CONCERTO NO. 2")
            .with_year(1976)
            .with_track(
                Track::new(1, 1, "Piano Concerto No. 2, Op. 83")
                    .with_artist(Artist::composer("Johannes Brahms"))
                    .with_artist(Artist::soloist("Maurizio Pollini"))
                    .with_path("scans.zip"),
            );
        Engine::standard()
            .unwrap()
            .with_clock(Box::new(FixedClock(2024)))
            .check(&album, None)
    }

    #[test]
    fn test_text_report_filters_and_summarizes() {
        let result = result();
        let text = render_text(&result, Severity::Error);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), result.counts.error + 1);
        assert!(lines.iter().any(|l| l.starts_with("error [2.3.1] track 1:")));
        assert!(lines.iter().any(|l| l.starts_with("error [2.3.18.2] album:")));
        assert!(lines.last().unwrap().contains("28 rules"));

        let everything = render_text(&result, Severity::Info);
        assert_eq!(everything.lines().count(), result.issues.len() + 1);
    }

    #[test]
    fn test_json_report() {
        let result = result();
        let json = render_json(&result, Severity::Warning).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["total"], 28);
        let issues = value["issues"].as_array().unwrap();
        assert!(issues.iter().all(|i| i["severity"] != "info"));
        assert_eq!(value["counts"]["error"], result.counts.error);
    }

    #[test]
    fn test_rule_listing() {
        let rules = Engine::standard().unwrap().registry().metadata();
        let listing = render_rules(&rules);
        assert_eq!(listing.lines().count(), 28);
        assert!(listing.lines().next().unwrap().starts_with("2.3.1 "));
        assert!(listing.contains("classical.opus"));
    }

    #[test]
    fn test_gate() {
        let result = result();
        assert!(gate(&result, Severity::Error, 0.0)
            .iter()
            .any(|f| matches!(f, GateFailure::Severity { severity: Severity::Error, .. })));

        let lenient = ValidationResult::new(Vec::new(), Vec::new());
        assert!(gate(&lenient, Severity::Error, 0.0).is_empty());
        // No rules scores zero
        assert_eq!(gate(&lenient, Severity::Error, 0.5).len(), 1);
    }
}
