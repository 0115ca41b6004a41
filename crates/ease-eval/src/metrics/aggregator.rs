//! Metrics aggregation for batch results
//!
//! Aggregates individual case results into summary metrics.

use chrono::Utc;

use super::types::{BatchMetrics, CaseResult, CaseStatus};

/// Aggregator for computing summary metrics from case results
pub struct MetricsAggregator {
    ease_version: String,
}

impl Default for MetricsAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsAggregator {
    /// Create a new aggregator stamped with this crate's version
    pub fn new() -> Self {
        Self {
            ease_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Override the version stamped on the metrics
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.ease_version = version.into();
        self
    }

    /// Aggregate results into batch metrics
    pub fn aggregate(&self, results: Vec<CaseResult>, total_time_secs: f64) -> BatchMetrics {
        let total_cases = results.len();
        let count = |status: CaseStatus| results.iter().filter(|r| r.status == status).count();
        let passed = count(CaseStatus::Passed);
        let failed = count(CaseStatus::Failed);
        let errors = count(CaseStatus::Error);

        let pass_rate = if total_cases > 0 {
            passed as f64 / total_cases as f64
        } else {
            0.0
        };

        let scores: Vec<u8> = results.iter().filter_map(CaseResult::score).collect();
        let mean_score = if scores.is_empty() {
            None
        } else {
            Some(scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64)
        };

        let mut score_histogram = [0usize; 10];
        for &score in &scores {
            if let Some(slot) = usize::from(score)
                .checked_sub(1)
                .and_then(|i| score_histogram.get_mut(i))
            {
                *slot += 1;
            }
        }

        let breakdowns: Vec<_> = results.iter().filter_map(|r| r.breakdown.as_ref()).collect();
        let mean_step_count = if breakdowns.is_empty() {
            0.0
        } else {
            breakdowns.iter().map(|b| b.step_count).sum::<usize>() as f64 / breakdowns.len() as f64
        };

        BatchMetrics {
            total_cases,
            passed,
            failed,
            errors,
            pass_rate,
            mean_score,
            min_score: scores.iter().copied().min(),
            max_score: scores.iter().copied().max(),
            score_histogram,
            mean_step_count,
            total_ambiguous_steps: breakdowns.iter().map(|b| b.ambiguous_steps.len()).sum(),
            total_non_standard_steps: breakdowns.iter().map(|b| b.non_standard_steps.len()).sum(),
            case_results: results,
            total_execution_time_secs: total_time_secs,
            timestamp: Utc::now(),
            ease_version: self.ease_version.clone(),
        }
    }
}
