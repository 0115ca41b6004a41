//! Verdict types
//!
//! The verdict is the only externally visible contract of the evaluator:
//!
//! ```json
//! { "summary": "...", "ease_score": 7, "justification": "..." }
//! ```

mod model_output;

pub use model_output::parse_model_verdict;

use serde::{Deserialize, Serialize};

use crate::error::{EaseError, EaseResult};
use crate::scoring::{MAX_SCORE, MIN_SCORE, PenaltyBreakdown};

/// Structured scoring result returned to a caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Verdict {
    /// Concise restatement of the steps
    pub summary: String,

    /// Ease score, 1 = very difficult, 10 = trivial
    pub ease_score: u8,

    /// Explanation of the score, referencing specific steps
    pub justification: String,
}

impl Verdict {
    /// Create a verdict, checking its invariants
    pub fn new(
        summary: impl Into<String>,
        ease_score: u8,
        justification: impl Into<String>,
    ) -> EaseResult<Self> {
        let verdict = Self {
            summary: summary.into(),
            ease_score,
            justification: justification.into(),
        };
        verdict.validate()?;
        Ok(verdict)
    }

    /// Check the verdict against its schema
    pub fn validate(&self) -> EaseResult<()> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&self.ease_score) {
            return Err(EaseError::validation_field(
                format!(
                    "ease_score must be within [{}, {}], got {}",
                    MIN_SCORE, MAX_SCORE, self.ease_score
                ),
                "ease_score",
            ));
        }
        if self.summary.trim().is_empty() {
            return Err(EaseError::validation_field("summary is empty", "summary"));
        }
        if self.justification.trim().is_empty() {
            return Err(EaseError::validation_field(
                "justification is empty",
                "justification",
            ));
        }
        Ok(())
    }

    /// Serialize to compact JSON
    pub fn to_json(&self) -> EaseResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serialize to pretty-printed JSON
    pub fn to_json_pretty(&self) -> EaseResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A verdict together with the arithmetic that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub verdict: Verdict,
    pub breakdown: PenaltyBreakdown,
}

impl Evaluation {
    /// Take the verdict, dropping the breakdown
    pub fn into_verdict(self) -> Verdict {
        self.verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_field_order() {
        let verdict = Verdict::new("Step 1: open", 10, "1 step").unwrap();
        assert_eq!(
            verdict.to_json().unwrap(),
            r#"{"summary":"Step 1: open","ease_score":10,"justification":"1 step"}"#
        );
    }

    #[test]
    fn test_verdict_rejects_out_of_range() {
        let err = Verdict::new("s", 0, "j").unwrap_err();
        assert_eq!(err.field(), Some("ease_score"));
        assert!(Verdict::new("s", 11, "j").is_err());
    }

    #[test]
    fn test_verdict_rejects_empty_text() {
        assert_eq!(
            Verdict::new(" ", 5, "j").unwrap_err().field(),
            Some("summary")
        );
        assert_eq!(
            Verdict::new("s", 5, "").unwrap_err().field(),
            Some("justification")
        );
    }

    #[test]
    fn test_verdict_deserialize_rejects_extra_fields() {
        let json = r#"{"summary":"s","ease_score":3,"justification":"j","confidence":0.9}"#;
        assert!(serde_json::from_str::<Verdict>(json).is_err());
    }
}
