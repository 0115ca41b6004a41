//! Scoring heuristic
//!
//! The score starts from a base value and loses points for long flows,
//! steps that deviate from common UI patterns, and ambiguous steps. The
//! running total is clamped into [1, 10] and rounded half-up.

mod breakdown;
mod weights;

pub use breakdown::{PenaltyBreakdown, round_half_up};
pub use weights::ScoringWeights;

/// Lowest score a verdict may carry
pub const MIN_SCORE: u8 = 1;

/// Highest score a verdict may carry
pub const MAX_SCORE: u8 = 10;
