//! Rule contract
//!
//! Every rule carries fixed [`RuleMetadata`] and a pure check function. Two
//! arities exist: [`AlbumRule`] runs once per album, [`TrackRule`] once per
//! actual track with its paired reference track.
//!
//! Contract shared by all rules:
//! - same input, same output; inputs are never mutated
//! - no reference means comparison checks are skipped (per check, not per rule)
//! - a rule never aborts; it returns every issue it found
//! - issue severity never exceeds the metadata severity

use cmv_common::{Album, Issue, Severity, Track};
use serde::Serialize;

/// Fixed description of a rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RuleMetadata {
    /// Stable identifier, unique across the registry
    pub id: &'static str,
    /// Human-readable name
    pub name: &'static str,
    /// Highest severity the rule emits
    pub severity: Severity,
    /// Contribution to the score, in (0, 1]
    pub weight: f64,
}

impl RuleMetadata {
    pub const fn new(id: &'static str, name: &'static str, severity: Severity, weight: f64) -> Self {
        Self {
            id,
            name,
            severity,
            weight,
        }
    }

    /// Build an issue for this rule, capped at the metadata severity
    pub fn issue(&self, severity: Severity, track: u32, message: impl Into<String>) -> Issue {
        Issue::new(severity.min(self.severity), track, self.id, message)
    }

    /// Issue at the metadata severity
    pub fn default_issue(&self, track: u32, message: impl Into<String>) -> Issue {
        self.issue(self.severity, track, message)
    }
}

/// Per-check values injected by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckContext {
    pub current_year: i32,
}

impl CheckContext {
    pub fn new(current_year: i32) -> Self {
        Self { current_year }
    }
}

/// Outcome of one rule over one check
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleResult {
    pub metadata: RuleMetadata,
    pub issues: Vec<Issue>,
}

impl RuleResult {
    pub fn new(metadata: RuleMetadata, issues: Vec<Issue>) -> Self {
        Self { metadata, issues }
    }

    /// A rule passes iff it produced no issues
    pub fn passed(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Rule evaluated once per album
pub trait AlbumRule: Send + Sync {
    fn metadata(&self) -> &RuleMetadata;

    /// Produce issues; album-scoped issues use track 0
    fn check(&self, ctx: &CheckContext, actual: &Album, reference: Option<&Album>) -> Vec<Issue>;

    fn evaluate(&self, ctx: &CheckContext, actual: &Album, reference: Option<&Album>) -> RuleResult {
        RuleResult::new(*self.metadata(), self.check(ctx, actual, reference))
    }
}

/// Rule evaluated once per actual track
pub trait TrackRule: Send + Sync {
    fn metadata(&self) -> &RuleMetadata;

    fn check(
        &self,
        ctx: &CheckContext,
        track: &Track,
        reference_track: Option<&Track>,
        album: &Album,
        reference: Option<&Album>,
    ) -> Vec<Issue>;
}
