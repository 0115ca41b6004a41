//! Regression detection for batch results
//!
//! Compares a current run against a baseline run of the same cases.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::metrics::{BatchMetrics, CaseResult};

/// A detected regression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Regression {
    /// Type of regression
    pub regression_type: RegressionType,

    /// Case the regression belongs to, absent for run-level regressions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,

    /// Description of the regression
    pub description: String,

    pub baseline_value: String,

    pub current_value: String,

    /// Severity (0.0 - 1.0)
    pub severity: f64,
}

/// Type of regression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegressionType {
    /// Mean score across the run dropped
    MeanScoreDecrease,
    /// A case scores lower than before
    CaseScoreDecrease,
    /// Previously passing case now fails or errors
    CaseRegression,
}

/// Regression detector configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RegressionConfig {
    /// Mean score drop that counts as a regression (strictly greater than)
    pub mean_score_threshold: f64,

    /// Per-case score drop that counts as a regression (greater or equal)
    pub case_score_threshold: u8,
}

impl Default for RegressionConfig {
    fn default() -> Self {
        Self {
            mean_score_threshold: 0.5,
            case_score_threshold: 1,
        }
    }
}

impl RegressionConfig {
    /// Set the per-case score drop threshold
    pub fn with_case_threshold(mut self, threshold: u8) -> Self {
        self.case_score_threshold = threshold.max(1);
        self
    }

    /// Set the mean score drop threshold
    pub fn with_mean_threshold(mut self, threshold: f64) -> Self {
        self.mean_score_threshold = threshold;
        self
    }
}

/// Detector for finding regressions between batch runs
pub struct RegressionDetector {
    config: RegressionConfig,
}

impl RegressionDetector {
    /// Create a new regression detector
    pub fn new(config: RegressionConfig) -> Self {
        Self { config }
    }

    /// Create with default configuration
    pub fn with_defaults() -> Self {
        Self::new(RegressionConfig::default())
    }

    /// Compare current metrics against baseline
    pub fn detect(&self, baseline: &BatchMetrics, current: &BatchMetrics) -> Vec<Regression> {
        let mut regressions = Vec::new();

        if let Some(reg) = self.check_mean_score(baseline, current) {
            regressions.push(reg);
        }

        let baseline_map: HashMap<&str, &CaseResult> = baseline
            .case_results
            .iter()
            .map(|r| (r.case_id.as_str(), r))
            .collect();

        for result in &current.case_results {
            if let Some(before) = baseline_map.get(result.case_id.as_str()) {
                regressions.extend(self.check_case(before, result));
            }
        }

        regressions
    }

    fn check_mean_score(&self, baseline: &BatchMetrics, current: &BatchMetrics) -> Option<Regression> {
        let (before, after) = (baseline.mean_score?, current.mean_score?);
        let drop = before - after;

        if drop > self.config.mean_score_threshold {
            Some(Regression {
                regression_type: RegressionType::MeanScoreDecrease,
                case_id: None,
                description: format!("Mean score decreased from {:.2} to {:.2}", before, after),
                baseline_value: format!("{:.2}", before),
                current_value: format!("{:.2}", after),
                severity: (drop / 9.0).min(1.0),
            })
        } else {
            None
        }
    }

    fn check_case(&self, before: &CaseResult, after: &CaseResult) -> Vec<Regression> {
        let mut regressions = Vec::new();

        if let (Some(old), Some(new)) = (before.score(), after.score()) {
            let drop = old.saturating_sub(new);
            if drop >= self.config.case_score_threshold {
                regressions.push(Regression {
                    regression_type: RegressionType::CaseScoreDecrease,
                    case_id: Some(after.case_id.clone()),
                    description: format!(
                        "Case '{}' score dropped from {} to {}",
                        after.case_id, old, new
                    ),
                    baseline_value: old.to_string(),
                    current_value: new.to_string(),
                    severity: (f64::from(drop) / 9.0).min(1.0),
                });
            }
        }

        if before.passed() && !after.passed() {
            regressions.push(Regression {
                regression_type: RegressionType::CaseRegression,
                case_id: Some(after.case_id.clone()),
                description: format!("Case '{}' was passing but now fails", after.case_id),
                baseline_value: before.status.label().to_string(),
                current_value: after.status.label().to_string(),
                severity: 0.8,
            });
        }

        regressions
    }

    /// Generate a summary of regressions
    pub fn summarize(regressions: &[Regression]) -> String {
        if regressions.is_empty() {
            return "No regressions detected.".to_string();
        }

        let mut summary = format!("Found {} regression(s):\n", regressions.len());

        for (i, reg) in regressions.iter().enumerate() {
            summary.push_str(&format!(
                "  {}. [{:?}] {} (severity: {:.0}%)\n",
                i + 1,
                reg.regression_type,
                reg.description,
                reg.severity * 100.0
            ));
        }

        summary
    }
}
