//! Monitoring and observability
//!
//! Batch metrics are recorded in-process; exporting them to an external sink
//! is left to the deployment.

pub mod metrics;

pub use metrics::{BatchMetricRecord, BatchMetrics, BatchOutcome, MetricsSnapshot, OperationStats};
