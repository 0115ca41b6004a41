//! Configuration model

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{EaseError, EaseResult};
use crate::scoring::ScoringWeights;
use crate::transcript::TranscriptConfig;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EaseConfig {
    /// Scoring weights
    pub scoring: ScoringWeights,

    /// Transcript classification rules
    pub transcript: TranscriptConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Report settings
    pub report: ReportConfig,
}

impl EaseConfig {
    /// Validate every section
    pub fn validate(&self) -> EaseResult<()> {
        self.scoring.validate()?;
        self.transcript.validate()?;
        self.logging.validate()?;
        self.report.validate()?;
        Ok(())
    }

    /// Render as TOML
    pub fn to_toml_string(&self) -> EaseResult<String> {
        toml::to_string_pretty(self)
            .map_err(|e| EaseError::config(format!("Failed to serialize config: {}", e)))
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty, compact)
    pub format: String,
    /// Log file path; logs go to stderr when unset
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
            log_file: None,
        }
    }
}

impl LoggingConfig {
    const LEVELS: [&'static str; 5] = ["trace", "debug", "info", "warn", "error"];
    const FORMATS: [&'static str; 3] = ["json", "pretty", "compact"];

    pub fn validate(&self) -> EaseResult<()> {
        if !Self::LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(EaseError::config(format!(
                "Invalid log level '{}', expected one of {}",
                self.level,
                Self::LEVELS.join(", ")
            )));
        }
        if !Self::FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(EaseError::config(format!(
                "Invalid log format '{}', expected one of {}",
                self.format,
                Self::FORMATS.join(", ")
            )));
        }
        Ok(())
    }
}

/// Report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Default report format (table, json, markdown)
    pub format: String,
    /// Per-case score drop that counts as a regression
    pub regression_threshold: u8,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            format: "table".to_string(),
            regression_threshold: 1,
        }
    }
}

impl ReportConfig {
    const FORMATS: [&'static str; 4] = ["table", "json", "markdown", "md"];

    pub fn validate(&self) -> EaseResult<()> {
        if !Self::FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(EaseError::config(format!(
                "Invalid report format '{}', expected table, json or markdown",
                self.format
            )));
        }
        if self.regression_threshold == 0 {
            return Err(EaseError::config("regression_threshold must be at least 1"));
        }
        Ok(())
    }
}
