//! Batch metrics

mod bounded;
mod collector;
mod types;

pub use bounded::MAX_RECENT_RECORDS;
pub use collector::BatchMetrics;
pub use types::{BatchMetricRecord, BatchOutcome, MetricsSnapshot, OperationStats};
