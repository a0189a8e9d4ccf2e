//! Batch metric types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// How a batch call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchOutcome {
    /// Every item succeeded
    Succeeded,
    /// Some items failed (non-atomic)
    PartiallySucceeded,
    /// No item succeeded
    Failed,
    /// Atomic batch compensated after a failure
    RolledBack,
    /// Rejected before execution (size bounds)
    Rejected,
}

/// One record per batch call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchMetricRecord {
    pub operation: String,
    pub atomic: bool,
    /// Items in the request
    pub item_count: usize,
    /// Wall-clock duration of the whole call
    pub duration_ms: u64,
    pub success_count: usize,
    pub failure_count: usize,
    pub outcome: BatchOutcome,
    pub recorded_at: DateTime<Utc>,
}

/// Aggregates per operation name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OperationStats {
    /// Batch calls, rejections included
    pub calls: u64,
    pub rejected: u64,
    pub rolled_back: u64,
    pub items_succeeded: u64,
    pub items_failed: u64,
    pub total_duration_ms: u64,
}

impl OperationStats {
    /// Mean call duration in milliseconds
    pub fn average_duration_ms(&self) -> f64 {
        if self.calls == 0 {
            0.0
        } else {
            self.total_duration_ms as f64 / self.calls as f64
        }
    }

    pub(super) fn apply(&mut self, record: &BatchMetricRecord) {
        self.calls += 1;
        match record.outcome {
            BatchOutcome::Rejected => self.rejected += 1,
            BatchOutcome::RolledBack => self.rolled_back += 1,
            _ => {}
        }
        self.items_succeeded += record.success_count as u64;
        self.items_failed += record.failure_count as u64;
        self.total_duration_ms += record.duration_ms;
    }
}

/// Point-in-time copy of the metrics, served by `/metrics/batch`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub total_calls: u64,
    pub operations: HashMap<String, OperationStats>,
    pub recent: Vec<BatchMetricRecord>,
}

/// Lock-protected storage behind [`BatchMetrics`](super::BatchMetrics)
#[derive(Debug, Default)]
pub(super) struct MetricsStorage {
    pub total_calls: u64,
    pub operations: HashMap<String, OperationStats>,
    pub recent: VecDeque<BatchMetricRecord>,
}
