//! Core metric types for batch evaluation

use chrono::{DateTime, Utc};
use ease_core::{EaseError, Evaluation, PenaltyBreakdown, Verdict};
use serde::{Deserialize, Serialize};

use crate::cases::{EvalCase, ScoreExpectation};

/// Outcome of a single case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// Scored inside the expected range, or no range was given
    Passed,
    /// Scored outside the expected range
    Failed,
    /// Could not be scored
    Error,
}

impl CaseStatus {
    /// Check if the status represents success
    pub fn is_success(&self) -> bool {
        matches!(self, CaseStatus::Passed)
    }

    /// Short upper-case label for tables
    pub fn label(&self) -> &'static str {
        match self {
            CaseStatus::Passed => "PASS",
            CaseStatus::Failed => "FAIL",
            CaseStatus::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for CaseStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of evaluating one case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResult {
    /// Case ID
    pub case_id: String,

    /// Goal of the case
    pub task_statement: String,

    /// Outcome
    pub status: CaseStatus,

    /// Number of steps in the evaluated flow
    #[serde(default)]
    pub step_count: usize,

    /// Verdict, absent when the case errored
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub verdict: Option<Verdict>,

    /// Arithmetic behind the verdict
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<PenaltyBreakdown>,

    /// Expected score range, if the case stated one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<ScoreExpectation>,

    /// Error message for errored cases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Error code for errored cases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl CaseResult {
    /// Build the result of a case that was scored
    pub fn evaluated(case: &EvalCase, evaluation: Evaluation) -> Self {
        let score = evaluation.verdict.ease_score;
        let status = match &case.expected {
            Some(expected) if !expected.contains(score) => CaseStatus::Failed,
            _ => CaseStatus::Passed,
        };

        Self {
            case_id: case.id.clone(),
            task_statement: case.task_statement.clone(),
            status,
            step_count: evaluation.breakdown.step_count,
            verdict: Some(evaluation.verdict),
            breakdown: Some(evaluation.breakdown),
            expected: case.expected,
            error: None,
            error_code: None,
            tags: case.tags.clone(),
        }
    }

    /// Build the result of a case that could not be scored
    pub fn errored(case: &EvalCase, error: &EaseError) -> Self {
        Self {
            case_id: case.id.clone(),
            task_statement: case.task_statement.clone(),
            status: CaseStatus::Error,
            step_count: 0,
            verdict: None,
            breakdown: None,
            expected: case.expected,
            error: Some(error.to_string()),
            error_code: Some(error.error_code().to_string()),
            tags: case.tags.clone(),
        }
    }

    /// Check if the case passed
    pub fn passed(&self) -> bool {
        self.status.is_success()
    }

    /// Score, when the case was scored
    pub fn score(&self) -> Option<u8> {
        self.verdict.as_ref().map(|v| v.ease_score)
    }
}

/// Summary of a batch run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchMetrics {
    /// Cases evaluated
    pub total_cases: usize,

    pub passed: usize,

    pub failed: usize,

    pub errors: usize,

    /// passed / total_cases, 0 for an empty run
    pub pass_rate: f64,

    /// Mean score over scored cases
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean_score: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_score: Option<u8>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_score: Option<u8>,

    /// Count of scored cases per score; index 0 holds score 1
    pub score_histogram: [usize; 10],

    /// Mean step count over scored cases
    pub mean_step_count: f64,

    /// Ambiguous steps across all scored cases
    pub total_ambiguous_steps: usize,

    /// Non-standard steps across all scored cases
    pub total_non_standard_steps: usize,

    /// Per-case results in run order
    pub case_results: Vec<CaseResult>,

    /// Wall time of the run
    pub total_execution_time_secs: f64,

    pub timestamp: DateTime<Utc>,

    /// Version of the evaluator that produced the run
    pub ease_version: String,
}

impl BatchMetrics {
    /// Find the result for a case
    pub fn result(&self, case_id: &str) -> Option<&CaseResult> {
        self.case_results.iter().find(|r| r.case_id == case_id)
    }

    /// True when no case failed or errored
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.errors == 0
    }

    /// Results that did not pass
    pub fn unsuccessful(&self) -> impl Iterator<Item = &CaseResult> {
        self.case_results.iter().filter(|r| !r.passed())
    }

    /// Pass rate as a percentage string
    pub fn pass_rate_percentage(&self) -> String {
        format!("{:.1}%", self.pass_rate * 100.0)
    }
}
