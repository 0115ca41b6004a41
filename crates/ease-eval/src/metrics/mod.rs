//! Metrics collection and aggregation for batch runs

mod aggregator;
mod types;

pub use aggregator::MetricsAggregator;
pub use types::{BatchMetrics, CaseResult, CaseStatus};
