//! Batch executors
//!
//! [`PoolExecutor`] runs items concurrently with a bounded number in flight;
//! [`SequentialExecutor`] runs them one at a time in index order.

use super::aggregate::ResultAggregator;
use super::types::{BatchErrorKind, BatchResult, ExecutionReport, ItemOperation, MAX_WORKERS};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Runs every index of a batch through an item operation
#[async_trait]
pub trait Executor: Send + Sync {
    /// Executor name for logs
    fn name(&self) -> &'static str;

    /// Execute indexes `0..count`
    async fn run(
        &self,
        cancel: &CancellationToken,
        count: usize,
        operation: ItemOperation,
    ) -> ExecutionReport;
}

/// Concurrent executor bounded by a per-batch semaphore
#[derive(Debug, Clone)]
pub struct PoolExecutor {
    max_workers: usize,
}

impl Default for PoolExecutor {
    fn default() -> Self {
        Self {
            max_workers: MAX_WORKERS,
        }
    }
}

impl PoolExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the in-flight limit
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }
}

#[async_trait]
impl Executor for PoolExecutor {
    fn name(&self) -> &'static str {
        "pool"
    }

    async fn run(
        &self,
        cancel: &CancellationToken,
        count: usize,
        operation: ItemOperation,
    ) -> ExecutionReport {
        let semaphore = Arc::new(Semaphore::new(self.max_workers));
        let aggregator = Arc::new(Mutex::new(ResultAggregator::new(count)));
        let mut tasks = JoinSet::new();

        for index in 0..count {
            let semaphore = semaphore.clone();
            let aggregator = aggregator.clone();
            let operation = operation.clone();
            let cancel = cancel.clone();

            tasks.spawn(async move {
                let _permit = match semaphore.acquire_owned().await {
                    Ok(permit) => permit,
                    Err(_) => {
                        aggregator
                            .lock()
                            .record(index, BatchResult::canceled(index).into(), false);
                        return;
                    }
                };

                if cancel.is_cancelled() {
                    debug!(index, "batch canceled, skipping item");
                    aggregator
                        .lock()
                        .record(index, BatchResult::canceled(index).into(), false);
                    return;
                }

                let outcome = operation(cancel, index).await;
                if !outcome.result.success {
                    debug!(
                        index,
                        status = outcome.result.status_code,
                        "batch item failed"
                    );
                }
                aggregator.lock().record(index, outcome, true);
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                error!(error = %e, "batch worker task failed");
            }
        }

        // Every task has been joined, so this is the last reference.
        let aggregator = match Arc::try_unwrap(aggregator) {
            Ok(mutex) => mutex.into_inner(),
            Err(shared) => {
                let mut guard = shared.lock();
                std::mem::replace(&mut *guard, ResultAggregator::new(0))
            }
        };

        aggregator.finish(|index| {
            BatchResult::failure(
                index,
                500,
                BatchErrorKind::BusinessFailure,
                "batch worker terminated before recording a result",
            )
        })
    }
}

/// One item at a time, strict index order
#[derive(Debug, Clone, Default)]
pub struct SequentialExecutor;

impl SequentialExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Executor for SequentialExecutor {
    fn name(&self) -> &'static str {
        "sequential"
    }

    async fn run(
        &self,
        cancel: &CancellationToken,
        count: usize,
        operation: ItemOperation,
    ) -> ExecutionReport {
        let mut aggregator = ResultAggregator::new(count);

        if cancel.is_cancelled() {
            debug!(count, "batch canceled before sequential execution");
            return aggregator.finish(BatchResult::canceled);
        }

        for index in 0..count {
            let outcome = operation(cancel.clone(), index).await;
            if !outcome.result.success {
                debug!(
                    index,
                    status = outcome.result.status_code,
                    "batch item failed"
                );
            }
            aggregator.record(index, outcome, false);
        }

        aggregator.finish(BatchResult::canceled)
    }
}
