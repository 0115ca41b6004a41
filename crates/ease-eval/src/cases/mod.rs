//! Evaluation cases
//!
//! Case definitions and loading from YAML/JSON files.

mod case;
mod loader;

pub use case::{CaseInput, EvalCase, ScoreExpectation};
pub use loader::{CaseLoader, load_cases_from_yaml};
