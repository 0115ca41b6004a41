//! Scoring weight configuration

use serde::{Deserialize, Serialize};

use crate::error::{EaseError, EaseResult};

use super::{MAX_SCORE, MIN_SCORE};

/// Weights applied by the scoring heuristic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Score of a flow with no penalties
    pub base_score: f64,

    /// Steps that carry no count penalty
    pub free_steps: usize,

    /// Penalty per step beyond `free_steps`
    pub step_penalty: f64,

    /// Cap on the total count penalty
    pub max_count_penalty: f64,

    /// Penalty per step whose pattern is `other`
    pub other_pattern_penalty: f64,

    /// Penalty per ambiguous step
    pub ambiguous_penalty: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            base_score: 10.0,
            free_steps: 3,
            step_penalty: 1.0,
            max_count_penalty: 5.0,
            other_pattern_penalty: 0.5,
            ambiguous_penalty: 1.5,
        }
    }
}

impl ScoringWeights {
    /// Set the base score
    pub fn with_base_score(mut self, base_score: f64) -> Self {
        self.base_score = base_score;
        self
    }

    /// Set the number of penalty-free steps
    pub fn with_free_steps(mut self, free_steps: usize) -> Self {
        self.free_steps = free_steps;
        self
    }

    /// Set the per-step count penalty and its cap
    pub fn with_count_penalty(mut self, per_step: f64, cap: f64) -> Self {
        self.step_penalty = per_step;
        self.max_count_penalty = cap;
        self
    }

    /// Set the penalty for non-standard steps
    pub fn with_other_pattern_penalty(mut self, penalty: f64) -> Self {
        self.other_pattern_penalty = penalty;
        self
    }

    /// Set the penalty for ambiguous steps
    pub fn with_ambiguous_penalty(mut self, penalty: f64) -> Self {
        self.ambiguous_penalty = penalty;
        self
    }

    /// Check the weights keep every score inside the verdict range and
    /// keep the score monotone in added penalties.
    pub fn validate(&self) -> EaseResult<()> {
        let (min, max) = (f64::from(MIN_SCORE), f64::from(MAX_SCORE));
        if !self.base_score.is_finite() || !(min..=max).contains(&self.base_score) {
            return Err(EaseError::config(format!(
                "base_score must be within [{}, {}], got {}",
                MIN_SCORE, MAX_SCORE, self.base_score
            )));
        }

        let penalties = [
            ("step_penalty", self.step_penalty),
            ("max_count_penalty", self.max_count_penalty),
            ("other_pattern_penalty", self.other_pattern_penalty),
            ("ambiguous_penalty", self.ambiguous_penalty),
        ];
        for (name, value) in penalties {
            if !value.is_finite() || value < 0.0 {
                return Err(EaseError::config(format!(
                    "{} must be a finite, non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
