//! Batch evaluation runner

mod config;
mod executor;

pub use config::EvalConfig;
pub use executor::{EvalProgress, EvalRunner, ProgressCallback};
