//! Ease: deterministic ease-of-use evaluation for UI interaction flows
//!
//! This crate bundles the evaluator ([`ease_core`]) and the batch harness
//! ([`ease_eval`]) behind one dependency.
//!
//! ```rust
//! use ease::{Flow, Step, UiPattern, evaluate};
//!
//! let flow = Flow::new("Open settings")
//!     .step(Step::new("Tap the gear icon", UiPattern::Navigation))
//!     .step(Step::new("Tap Display", UiPattern::Navigation));
//!
//! let verdict = evaluate(&flow).unwrap();
//! assert_eq!(verdict.ease_score, 10);
//! ```

pub use ease_core::{
    EaseConfig, EaseError, EaseResult, Evaluation, Evaluator, Flow, PenaltyBreakdown,
    ScoringWeights, Step, TranscriptConfig, TranscriptParser, UiPattern, Verdict, evaluate,
    load_config, load_config_from_file, parse_model_verdict,
};

/// Core evaluator, configuration and transcript parsing
pub use ease_core as engine;

/// Batch harness: cases, runner, metrics, reports, regressions
pub use ease_eval as eval;
