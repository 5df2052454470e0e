//! Rule registry
//!
//! Holds the installed rules in registration order. Populated explicitly by
//! the embedder (or [`RuleRegistry::standard`]) and never mutated once an
//! engine owns it.

use crate::rule::{AlbumRule, RuleMetadata, TrackRule};
use cmv_common::{Error, Result};
use std::collections::HashSet;
use tracing::debug;

#[derive(Default)]
pub struct RuleRegistry {
    album_rules: Vec<Box<dyn AlbumRule>>,
    track_rules: Vec<Box<dyn TrackRule>>,
}

impl RuleRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the full rule library installed
    pub fn standard() -> Self {
        let mut registry = Self::new();
        crate::rules::install(&mut registry);
        debug!(
            album_rules = registry.album_rules.len(),
            track_rules = registry.track_rules.len(),
            "Installed standard rule library"
        );
        registry
    }

    pub fn register_album(&mut self, rule: impl AlbumRule + 'static) -> &mut Self {
        self.album_rules.push(Box::new(rule));
        self
    }

    pub fn register_track(&mut self, rule: impl TrackRule + 'static) -> &mut Self {
        self.track_rules.push(Box::new(rule));
        self
    }

    /// Drop every rule whose id is listed
    pub fn without<S: AsRef<str>>(mut self, ids: &[S]) -> Self {
        let disabled: HashSet<&str> = ids.iter().map(|s| s.as_ref()).collect();
        self.album_rules.retain(|r| !disabled.contains(r.metadata().id));
        self.track_rules.retain(|r| !disabled.contains(r.metadata().id));
        self
    }

    pub fn album_rules(&self) -> &[Box<dyn AlbumRule>] {
        &self.album_rules
    }

    pub fn track_rules(&self) -> &[Box<dyn TrackRule>] {
        &self.track_rules
    }

    pub fn len(&self) -> usize {
        self.album_rules.len() + self.track_rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Metadata of every rule: album rules first, then track rules
    pub fn metadata(&self) -> Vec<RuleMetadata> {
        self.album_rules
            .iter()
            .map(|r| *r.metadata())
            .chain(self.track_rules.iter().map(|r| *r.metadata()))
            .collect()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.metadata().iter().any(|m| m.id == id)
    }

    /// Reject malformed metadata
    ///
    /// Bad weights and duplicate ids are programmer errors; they are caught
    /// here, once, rather than during a check.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for meta in self.metadata() {
            if meta.id.trim().is_empty() {
                return Err(Error::Registry(format!("rule '{}' has an empty id", meta.name)));
            }
            if meta.name.trim().is_empty() {
                return Err(Error::Registry(format!("rule {} has an empty name", meta.id)));
            }
            if !meta.weight.is_finite() || meta.weight <= 0.0 || meta.weight > 1.0 {
                return Err(Error::Registry(format!(
                    "rule {} has weight {} outside (0, 1]",
                    meta.id, meta.weight
                )));
            }
            if !seen.insert(meta.id) {
                return Err(Error::Registry(format!("duplicate rule id {}", meta.id)));
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.metadata().iter().map(|m| m.id).collect::<Vec<_>>())
            .finish()
    }
}
