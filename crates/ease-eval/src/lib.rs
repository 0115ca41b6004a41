//! Batch evaluation harness for Ease
//!
//! Loads evaluation cases from YAML/JSON, scores each one with the
//! deterministic evaluator, and reports the results.
//!
//! # Features
//!
//! - **Case files**: structured steps, inline transcripts or transcript
//!   files, each with an optional expected score range
//! - **Metrics**: pass/fail/error counts, score distribution, step totals
//! - **Report Generation**: JSON, Markdown and terminal table output
//! - **Regression Detection**: compare a run against a saved baseline
//!
//! # Example
//!
//! ```rust,no_run
//! use ease_core::EaseConfig;
//! use ease_eval::{CaseLoader, EvalConfig, EvalRunner, ReportFormat, generate_report};
//!
//! # fn main() -> anyhow::Result<()> {
//! let cases = CaseLoader::new("cases/").load_all()?;
//! let runner = EvalRunner::from_config(EvalConfig::default(), &EaseConfig::default())?;
//! let metrics = runner.run(&cases);
//! println!("{}", generate_report(&metrics, ReportFormat::Table)?);
//! # Ok(())
//! # }
//! ```

pub mod cases;
pub mod metrics;
pub mod regression;
pub mod report;
pub mod runner;

// Re-exports for convenience
pub use cases::{CaseInput, CaseLoader, EvalCase, ScoreExpectation, load_cases_from_yaml};
pub use metrics::{BatchMetrics, CaseResult, CaseStatus, MetricsAggregator};
pub use regression::{Regression, RegressionConfig, RegressionDetector, RegressionType};
pub use report::{JsonReporter, MarkdownReporter, ReportFormat, generate_report};
pub use runner::{EvalConfig, EvalProgress, EvalRunner, ProgressCallback};
