//! Configuration loading
//!
//! The engine itself has no runtime configuration surface; this module covers
//! what an embedder (the `cmv-check` binary) reads from TOML:
//! disabled rules, reporting threshold, pinned year and logging.
//!
//! # Resolution order
//!
//! 1. Explicit path (command-line argument)
//! 2. `CMV_CONFIG` environment variable
//! 3. `<user config dir>/cmv/config.toml`
//! 4. Built-in defaults

use crate::model::Severity;
use crate::time::{Clock, FixedClock, SystemClock};
use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming a config file
pub const CONFIG_ENV_VAR: &str = "CMV_CONFIG";

/// Validator configuration loaded from TOML
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Pins the year used by date rules; system clock when absent
    #[serde(default)]
    pub current_year: Option<i32>,

    /// Rule ids removed from the standard registry
    #[serde(default)]
    pub disabled_rules: Vec<String>,

    /// Issues below this severity are not reported
    #[serde(default = "default_min_severity")]
    pub min_severity: Severity,

    /// An issue at or above this severity fails the check
    #[serde(default = "default_fail_on")]
    pub fail_on: Severity,

    /// Score below which the check fails
    #[serde(default)]
    pub min_score: f64,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_min_severity() -> Severity {
    Severity::Info
}

fn default_fail_on() -> Severity {
    Severity::Error
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            current_year: None,
            disabled_rules: Vec::new(),
            min_severity: default_min_severity(),
            fail_on: default_fail_on(),
            min_score: 0.0,
            logging: LoggingConfig::default(),
        }
    }
}

impl CheckConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: CheckConfig =
            toml::from_str(content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))
    }

    /// Resolve and load configuration following the documented priority order
    ///
    /// An explicitly named file (argument or environment) must exist and parse.
    /// The per-user default location is optional.
    pub fn load(cli_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = cli_path {
            info!("Loading configuration from {}", path.display());
            return Self::from_file(path);
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                let path = PathBuf::from(path);
                info!("Loading configuration from {} ({})", path.display(), CONFIG_ENV_VAR);
                return Self::from_file(&path);
            }
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                info!("Loading configuration from {}", path.display());
                return Self::from_file(&path);
            }
            debug!("No config file at {}, using defaults", path.display());
        }

        Ok(Self::default())
    }

    fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(Error::Config(format!(
                "min_score must be within [0, 1], got {}",
                self.min_score
            )));
        }
        if let Some(year) = self.current_year {
            if year <= 0 {
                return Err(Error::Config(format!(
                    "current_year must be positive, got {}",
                    year
                )));
            }
        }
        Ok(())
    }

    /// Clock honoring `current_year`
    pub fn clock(&self) -> Box<dyn Clock> {
        match self.current_year {
            Some(year) => Box::new(FixedClock(year)),
            None => Box::new(SystemClock),
        }
    }
}

/// Per-user config file location for the platform
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cmv").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = CheckConfig::default();
        assert_eq!(config.min_severity, Severity::Info);
        assert_eq!(config.fail_on, Severity::Error);
        assert_eq!(config.logging.level, "info");
        assert!(config.disabled_rules.is_empty());
    }

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config = CheckConfig::from_toml_str("").unwrap();
        assert_eq!(config, CheckConfig::default());
    }

    #[test]
    fn test_full_toml() {
        let config = CheckConfig::from_toml_str(
            r#"
            current_year = 2025
            disabled_rules = ["classical.guest", "2.3.19"]
            min_severity = "warning"
            fail_on = "warning"
            min_score = 0.8

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.current_year, Some(2025));
        assert_eq!(config.disabled_rules, vec!["classical.guest", "2.3.19"]);
        assert_eq!(config.min_severity, Severity::Warning);
        assert_eq!(config.fail_on, Severity::Warning);
        assert_eq!(config.min_score, 0.8);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.clock().current_year(), 2025);
    }

    #[test]
    fn test_rejects_out_of_range_score() {
        let err = CheckConfig::from_toml_str("min_score = 1.5").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_keys() {
        assert!(CheckConfig::from_toml_str("colour = true").is_err());
    }

    #[test]
    fn test_rejects_bad_severity() {
        assert!(CheckConfig::from_toml_str(r#"min_severity = "fatal""#).is_err());
    }
}
