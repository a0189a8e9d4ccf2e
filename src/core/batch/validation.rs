//! Batch size validation and atomic pre-validation

use super::types::{
    BatchErrorKind, BatchResult, ExecutionReport, ExistsCheck, MAX_BATCH_SIZE, MIN_BATCH_SIZE,
    PRECHECK_FAILED_STATUS,
};
use crate::utils::error::{GatewayError, Result};
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Message carried by every item when the atomic pre-check fails
pub const PRECHECK_FAILED_MESSAGE: &str = "atomic failure: some targets not found";

/// Reject batches outside `MIN_BATCH_SIZE..=MAX_BATCH_SIZE`
pub fn validate_batch_size(count: usize) -> Result<()> {
    if !(MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&count) {
        return Err(GatewayError::validation(format!(
            "batch size must be between {} and {}, got {}",
            MIN_BATCH_SIZE, MAX_BATCH_SIZE, count
        )));
    }
    Ok(())
}

/// Confirms every delete target exists before anything destructive runs
#[derive(Debug, Clone, Default)]
pub struct AtomicPreValidator;

impl AtomicPreValidator {
    pub fn new() -> Self {
        Self
    }

    /// Probe `ids` in order, stopping at the first miss
    pub async fn all_exist(
        &self,
        cancel: &CancellationToken,
        ids: &[String],
        exists: &ExistsCheck,
    ) -> bool {
        for (index, id) in ids.iter().enumerate() {
            if !exists(cancel.clone(), id.clone()).await {
                debug!(index, id = %id, "atomic pre-check target missing");
                return false;
            }
        }
        true
    }

    /// Uniform failure report for a failed pre-check
    pub fn failure_report(count: usize) -> ExecutionReport {
        let results = (0..count)
            .map(|index| {
                BatchResult::failure(
                    index,
                    PRECHECK_FAILED_STATUS,
                    BatchErrorKind::AtomicPrecheckFailure,
                    PRECHECK_FAILED_MESSAGE,
                )
            })
            .collect();

        ExecutionReport {
            results,
            success_count: 0,
            failure_count: count,
            created_ids: Vec::new(),
        }
    }
}
