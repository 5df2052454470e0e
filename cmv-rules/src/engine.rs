//! Dispatcher
//!
//! Runs album rules once, then every track rule once per actual track. Each
//! actual track is paired with the reference track sharing its
//! `(disc, number)` key; pairing is by lookup, never by position.

use crate::aggregate::ValidationResult;
use crate::registry::RuleRegistry;
use crate::rule::{CheckContext, RuleResult};
use cmv_common::{Album, Clock, Result, SystemClock};
use tracing::{debug, info};

pub struct Engine {
    registry: RuleRegistry,
    clock: Box<dyn Clock>,
}

impl Engine {
    /// Validate the registry and build an engine reading the system clock
    pub fn new(registry: RuleRegistry) -> Result<Self> {
        registry.validate()?;
        Ok(Self {
            registry,
            clock: Box::new(SystemClock),
        })
    }

    /// Engine with the full rule library
    pub fn standard() -> Result<Self> {
        Self::new(RuleRegistry::standard())
    }

    /// Replace the clock (pins "current year" for date rules)
    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Run every installed rule over `actual`, comparing against `reference`
    pub fn check(&self, actual: &Album, reference: Option<&Album>) -> ValidationResult {
        let ctx = CheckContext::new(self.clock.current_year());
        let mut issues = Vec::new();
        let mut results = Vec::with_capacity(self.registry.len());

        for rule in self.registry.album_rules() {
            let result = rule.evaluate(&ctx, actual, reference);
            debug!(rule = rule.metadata().id, issues = result.issues.len(), "Album rule evaluated");
            issues.extend(result.issues.iter().cloned());
            results.push(result);
        }

        let track_rules = self.registry.track_rules();
        let mut track_results: Vec<RuleResult> = track_rules
            .iter()
            .map(|r| RuleResult::new(*r.metadata(), Vec::new()))
            .collect();

        let reference_index = reference.map(Album::track_index).unwrap_or_default();

        for track in &actual.tracks {
            let reference_track = reference_index.get(&track.key()).copied();
            for (rule, result) in track_rules.iter().zip(track_results.iter_mut()) {
                let found = rule.check(&ctx, track, reference_track, actual, reference);
                issues.extend(found.iter().cloned());
                result.issues.extend(found);
            }
        }

        for result in &track_results {
            debug!(rule = result.metadata.id, issues = result.issues.len(), "Track rule evaluated");
        }
        results.extend(track_results);

        let validation = ValidationResult::new(results, issues);
        info!(
            album = %actual.title,
            rules = validation.total,
            failed = validation.failed,
            errors = validation.counts.error,
            warnings = validation.counts.warning,
            score = validation.score,
            "Check complete"
        );
        validation
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("registry", &self.registry)
            .field("current_year", &self.clock.current_year())
            .finish()
    }
}
