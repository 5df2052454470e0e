//! Issues emitted by rules

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Issue severity, ordered `Info < Warning < Error`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Stylistic suggestion
    Info,
    /// Likely wrong, recoverable
    Warning,
    /// Violates a strong rule
    Error,
}

impl Severity {
    pub const ALL: [Severity; 3] = [Severity::Error, Severity::Warning, Severity::Info];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "warning" | "warn" => Ok(Severity::Warning),
            "error" => Ok(Severity::Error),
            other => Err(format!("unknown severity '{}'", other)),
        }
    }
}

/// One finding
///
/// `track` is the track number the issue concerns, or 0 for album scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub severity: Severity,
    pub track: u32,
    pub rule_id: String,
    pub message: String,
}

impl Issue {
    pub fn new(
        severity: Severity,
        track: u32,
        rule_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        // Messages are single-line
        let message: String = message.into();
        let message = if message.contains(['\n', '\r']) {
            message.replace(['\n', '\r'], " ")
        } else {
            message
        };
        Self {
            severity,
            track,
            rule_id: rule_id.into(),
            message,
        }
    }

    pub fn is_album_scope(&self) -> bool {
        self.track == 0
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_album_scope() {
            write!(f, "{} [{}] album: {}", self.severity, self.rule_id, self.message)
        } else {
            write!(
                f,
                "{} [{}] track {}: {}",
                self.severity, self.rule_id, self.track, self.message
            )
        }
    }
}
