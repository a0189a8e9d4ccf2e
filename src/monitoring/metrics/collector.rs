//! Batch metrics collector

use super::bounded::{BoundedPush, MAX_RECENT_RECORDS};
use super::types::{BatchMetricRecord, MetricsSnapshot, MetricsStorage, OperationStats};
use parking_lot::RwLock;
use tracing::debug;

/// In-process batch metrics
///
/// All state sits behind a single lock; writers hold it only for the
/// duration of one record.
#[derive(Debug, Default)]
pub struct BatchMetrics {
    storage: RwLock<MetricsStorage>,
}

impl BatchMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one batch call
    pub fn record(&self, record: BatchMetricRecord) {
        debug!(
            operation = %record.operation,
            atomic = record.atomic,
            duration_ms = record.duration_ms,
            outcome = ?record.outcome,
            "batch metric recorded"
        );

        let mut storage = self.storage.write();
        storage.total_calls += 1;
        storage
            .operations
            .entry(record.operation.clone())
            .or_default()
            .apply(&record);
        storage.recent.push_bounded(record, MAX_RECENT_RECORDS);
    }

    /// Total calls recorded
    pub fn total_calls(&self) -> u64 {
        self.storage.read().total_calls
    }

    /// Aggregates for one operation
    pub fn operation_stats(&self, operation: &str) -> Option<OperationStats> {
        self.storage.read().operations.get(operation).cloned()
    }

    /// The most recent records, oldest first
    pub fn recent(&self, limit: usize) -> Vec<BatchMetricRecord> {
        let storage = self.storage.read();
        let skip = storage.recent.len().saturating_sub(limit);
        storage.recent.iter().skip(skip).cloned().collect()
    }

    /// Copy everything out
    pub fn snapshot(&self) -> MetricsSnapshot {
        let storage = self.storage.read();
        MetricsSnapshot {
            total_calls: storage.total_calls,
            operations: storage.operations.clone(),
            recent: storage.recent.iter().cloned().collect(),
        }
    }
}
