//! Ease Core Library
//!
//! Deterministic, rule-based evaluation of how easy a recorded sequence of
//! UI interaction steps is to perform. A [`Flow`] goes in, a [`Verdict`]
//! with a summary, an integer score in [1, 10] and a justification comes out.
//!
//! # Example
//!
//! ```rust
//! use ease_core::{Flow, Step, UiPattern, evaluate};
//!
//! let flow = Flow::new("save settings")
//!     .step(Step::new("navigate to settings", UiPattern::Navigation))
//!     .step(Step::new("tap save", UiPattern::Confirmation));
//!
//! let verdict = evaluate(&flow)?;
//! assert_eq!(verdict.ease_score, 10);
//! # Ok::<(), ease_core::EaseError>(())
//! ```

pub mod config;
pub mod error;
pub mod evaluator;
pub mod flow;
pub mod scoring;
pub mod transcript;
pub mod verdict;

// Re-export commonly used types
pub use config::{EaseConfig, load_config, load_config_from_file};
pub use error::{EaseError, EaseResult};
pub use evaluator::{Evaluator, evaluate};
pub use flow::{Flow, Step, UiPattern};
pub use scoring::{PenaltyBreakdown, ScoringWeights};
pub use transcript::{TranscriptConfig, TranscriptParser};
pub use verdict::{Evaluation, Verdict, parse_model_verdict};
