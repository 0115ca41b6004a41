//! Penalty arithmetic for one flow

use serde::{Deserialize, Serialize};

use super::{MAX_SCORE, MIN_SCORE, ScoringWeights};
use crate::flow::Flow;

/// Round to the nearest integer, ties rounding up (6.5 -> 7)
pub fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// The arithmetic that produced a score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PenaltyBreakdown {
    /// Score before penalties
    pub base_score: f64,

    /// Total number of steps
    pub step_count: usize,

    /// Steps that carry no count penalty
    pub free_steps: usize,

    /// Penalty from the number of steps (already capped)
    pub count_penalty: f64,

    /// True when the cap limited the count penalty
    #[serde(default)]
    pub count_capped: bool,

    /// 1-based positions of ambiguous steps
    pub ambiguous_steps: Vec<usize>,

    /// Penalty from ambiguous steps
    pub ambiguity_penalty: f64,

    /// 1-based positions of steps using the `other` pattern
    pub non_standard_steps: Vec<usize>,

    /// Penalty from non-standard steps
    pub pattern_penalty: f64,

    /// Base score minus all penalties
    pub raw_score: f64,

    /// Raw score clamped into the verdict range
    pub clamped_score: f64,

    /// Clamped score rounded half-up
    pub rounded_score: f64,
}

impl PenaltyBreakdown {
    /// Apply the weights to a flow. Does not validate the flow.
    pub fn compute(flow: &Flow, weights: &ScoringWeights) -> Self {
        let step_count = flow.len();
        let extra_steps = step_count.saturating_sub(weights.free_steps);
        let uncapped = extra_steps as f64 * weights.step_penalty;
        let count_capped = uncapped > weights.max_count_penalty;
        let count_penalty = uncapped.min(weights.max_count_penalty);

        let ambiguous_steps = flow.ambiguous_positions();
        let ambiguity_penalty = ambiguous_steps.len() as f64 * weights.ambiguous_penalty;

        let non_standard_steps = flow.non_standard_positions();
        let pattern_penalty = non_standard_steps.len() as f64 * weights.other_pattern_penalty;

        let raw_score = weights.base_score - count_penalty - pattern_penalty - ambiguity_penalty;
        let clamped_score = raw_score.clamp(f64::from(MIN_SCORE), f64::from(MAX_SCORE));
        let rounded_score = round_half_up(clamped_score);

        Self {
            base_score: weights.base_score,
            step_count,
            free_steps: weights.free_steps,
            count_penalty,
            count_capped,
            ambiguous_steps,
            ambiguity_penalty,
            non_standard_steps,
            pattern_penalty,
            raw_score,
            clamped_score,
            rounded_score,
        }
    }

    /// Sum of all penalties
    pub fn total_penalty(&self) -> f64 {
        self.count_penalty + self.pattern_penalty + self.ambiguity_penalty
    }

    /// True when clamping changed the raw score
    pub fn was_clamped(&self) -> bool {
        self.raw_score != self.clamped_score
    }
}
