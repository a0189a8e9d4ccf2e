//! Compensating rollback for atomic batches
//!
//! Best effort: one undo attempt per created identifier, failures are
//! counted and logged, never retried and never surfaced to the caller.

use super::types::{
    BatchErrorKind, BatchItemError, ExecutionReport, ROLLED_BACK_STATUS, RollbackOperation,
};
use crate::utils::error::Result;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

/// Message carried by results undone by rollback
pub const ROLLED_BACK_MESSAGE: &str = "rolled back: another item in the atomic batch failed";

/// Undo each id once, returning the number of failed attempts
pub async fn compensate<F, Fut>(ids: &[String], mut undo_one: F) -> usize
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<()>>,
{
    let mut failures = 0;
    for id in ids {
        if let Err(e) = undo_one(id.clone()).await {
            failures += 1;
            warn!(id = %id, error = %e, "rollback of created item failed");
        }
    }
    failures
}

/// Applies a rollback operation and relabels the undone successes
#[derive(Debug, Clone, Default)]
pub struct RollbackCoordinator;

impl RollbackCoordinator {
    pub fn new() -> Self {
        Self
    }

    /// Compensate `report.created_ids` and relabel every success as rolled back
    ///
    /// The rollback runs under a fresh token so it is not skipped when the
    /// batch deadline has already fired.
    pub async fn roll_back(
        &self,
        operation_name: &str,
        report: ExecutionReport,
        rollback: &RollbackOperation,
    ) -> ExecutionReport {
        let ExecutionReport {
            mut results,
            created_ids,
            ..
        } = report;

        let attempted = created_ids.len();
        let failures = rollback(CancellationToken::new(), created_ids).await;
        if failures > 0 {
            warn!(
                operation = operation_name,
                attempted, failures, "rollback finished with failures"
            );
        } else {
            info!(operation = operation_name, attempted, "rollback completed");
        }

        for result in results.iter_mut().filter(|r| r.success) {
            result.success = false;
            result.status_code = ROLLED_BACK_STATUS;
            result.data = None;
            result.error = Some(BatchItemError::new(
                BatchErrorKind::RolledBack,
                ROLLED_BACK_MESSAGE,
            ));
        }

        let failure_count = results.len();
        ExecutionReport {
            results,
            success_count: 0,
            failure_count,
            created_ids: Vec::new(),
        }
    }
}
