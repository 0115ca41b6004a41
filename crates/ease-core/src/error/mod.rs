//! Error types for the ease-of-use evaluator
//!
//! Two kinds of failure belong to the evaluation contract itself:
//! - `InvalidInput`: the caller handed over a flow that cannot be scored
//! - `Validation`: a verdict (computed or model-produced) violates its schema
//!
//! The remaining variants cover the ambient surfaces (configuration files,
//! transcript files, serialized inputs).

mod constructors;
mod conversions;
mod types;

pub use types::{EaseError, EaseResult};
