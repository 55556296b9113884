//! TOML-based sweep configuration.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::sim::arrivals::REQUEST_MULTIPLIER;
use crate::sim::error::SimError;
use crate::sim::sweep::RateGrid;

/// Top-level sweep configuration parsed from TOML.
///
/// Every section has defaults matching the reference run (zone `SE-SE3`,
/// rates 10 to 750 in steps of 10). Load from TOML with
/// [`SweepConfig::from_toml_file`] or use [`SweepConfig::reference`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SweepConfig {
    /// Input log and zone selection.
    #[serde(default)]
    pub trace: TraceConfig,
    /// Service-rate grid.
    #[serde(default)]
    pub rates: RatesConfig,
    /// Report options.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Input log and zone selection.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceConfig {
    /// Request log path. Usually supplied on the command line.
    pub path: Option<PathBuf>,
    /// Zone whose requests are simulated.
    pub zone: String,
    /// Individual requests represented by one log record (must be > 0).
    pub request_multiplier: u64,
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            path: None,
            zone: "SE-SE3".to_string(),
            request_multiplier: REQUEST_MULTIPLIER,
        }
    }
}

/// Service-rate grid, `start` inclusive and `stop` exclusive.
///
/// Signed so that negative values reach validation instead of failing to
/// parse.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RatesConfig {
    pub start: i64,
    pub stop: i64,
    pub step: i64,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            start: 10,
            stop: 750,
            step: 10,
        }
    }
}

impl RatesConfig {
    /// Converts to a validated [`RateGrid`].
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidParameter`] for a non-positive start or
    /// step, or a stop not above start.
    pub fn grid(&self) -> Result<RateGrid, SimError> {
        RateGrid::new(self.start, self.stop, self.step)
    }
}

/// Report options.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Mean wait (seconds) to find the smallest sufficient rate for.
    pub target_wait_seconds: Option<f64>,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"rates.step"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl SweepConfig {
    /// Returns the reference configuration.
    pub fn reference() -> Self {
        Self::default()
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)
            .map_err(|e| ConfigError::new("config", format!("cannot read \"{}\": {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns every problem found.
    ///
    /// Returns an empty vector if the configuration is valid. The trace path
    /// is not checked here; it may still arrive from the command line.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let t = &self.trace;
        if t.zone.trim().is_empty() {
            errors.push(ConfigError::new("trace.zone", "must not be empty"));
        }
        if t.request_multiplier == 0 {
            errors.push(ConfigError::new("trace.request_multiplier", "must be > 0"));
        }

        let r = &self.rates;
        if r.start <= 0 {
            errors.push(ConfigError::new("rates.start", format!("must be > 0, got {}", r.start)));
        }
        if r.step <= 0 {
            errors.push(ConfigError::new("rates.step", format!("must be > 0, got {}", r.step)));
        }
        if r.stop <= r.start {
            errors.push(ConfigError::new(
                "rates.stop",
                format!("must be > rates.start ({}), got {}", r.start, r.stop),
            ));
        }

        if let Some(target) = self.report.target_wait_seconds {
            if !target.is_finite() || target < 0.0 {
                errors.push(ConfigError::new(
                    "report.target_wait_seconds",
                    format!("must be a finite value >= 0, got {target}"),
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_is_valid() {
        let cfg = SweepConfig::reference();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "reference should be valid: {errors:?}");
        assert_eq!(cfg.trace.zone, "SE-SE3");
        assert_eq!(cfg.trace.request_multiplier, 30);
        assert_eq!(cfg.rates.grid().map(|g| g.len()), Ok(74));
    }

    #[test]
    fn full_toml_parses() {
        let toml = r#"
[trace]
path = "requests_global.txt"
zone = "DE"
request_multiplier = 12

[rates]
start = 5
stop = 100
step = 5

[report]
target_wait_seconds = 2.5
"#;
        let cfg = SweepConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.as_ref().err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.trace.zone.as_str()), Some("DE"));
        assert_eq!(
            cfg.as_ref().and_then(|c| c.trace.path.as_deref()),
            Some(Path::new("requests_global.txt"))
        );
        assert_eq!(cfg.as_ref().map(|c| c.rates.step), Some(5));
        assert_eq!(
            cfg.as_ref().and_then(|c| c.report.target_wait_seconds),
            Some(2.5)
        );
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = SweepConfig::from_toml_str("[rates]\nstep = 1\n").ok();
        assert_eq!(cfg.as_ref().map(|c| c.rates.step), Some(1));
        assert_eq!(cfg.as_ref().map(|c| c.rates.start), Some(10));
        assert_eq!(cfg.as_ref().map(|c| c.trace.zone.as_str()), Some("SE-SE3"));
    }

    #[test]
    fn unknown_field_rejected() {
        let result = SweepConfig::from_toml_str("[rates]\nstart = 1\nbogus = true\n");
        assert!(result.is_err());
        assert!(SweepConfig::from_toml_str("[plot]\n").is_err());
    }

    #[test]
    fn validation_reports_every_bad_field() {
        let mut cfg = SweepConfig::reference();
        cfg.trace.zone = "  ".into();
        cfg.trace.request_multiplier = 0;
        cfg.rates.start = -1;
        cfg.rates.step = 0;
        cfg.report.target_wait_seconds = Some(f64::NAN);
        let errors = cfg.validate();
        for field in [
            "trace.zone",
            "trace.request_multiplier",
            "rates.start",
            "rates.step",
            "report.target_wait_seconds",
        ] {
            assert!(errors.iter().any(|e| e.field == field), "missing {field}");
        }
    }

    #[test]
    fn validation_catches_empty_grid() {
        let mut cfg = SweepConfig::reference();
        cfg.rates.stop = cfg.rates.start;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "rates.stop"));
    }

    #[test]
    fn error_display_names_field() {
        let e = ConfigError::new("rates.step", "must be > 0");
        assert_eq!(e.to_string(), "config error: rates.step: must be > 0");
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = SweepConfig::from_toml_file(Path::new("/nonexistent/sweep.toml"));
        assert!(err.is_err_and(|e| e.field == "config"));
    }
}
