//! Batch orchestrator
//!
//! Drives one batch call through its phases, which never overlap:
//! size check, atomic pre-check (deletes), execution, rollback (creates),
//! status, metrics.
//!
//! The phases run on their own task. Dropping the caller's future (client
//! disconnect) leaves the batch running to completion; only the token stops
//! unstarted items.

use super::executor::{Executor, PoolExecutor, SequentialExecutor};
use super::rollback::RollbackCoordinator;
use super::types::{
    BatchConfig, BatchResponse, ExecutionReport, ExistsCheck, ItemOperation, RollbackOperation,
};
use super::validation::{AtomicPreValidator, validate_batch_size};
use crate::monitoring::{BatchMetricRecord, BatchMetrics, BatchOutcome};
use crate::utils::error::{GatewayError, Result};
use std::sync::Arc;
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Existence probe over the batch targets
#[derive(Clone)]
pub struct Precheck {
    pub ids: Vec<String>,
    pub exists: ExistsCheck,
}

/// Everything the orchestrator needs to run one batch
#[derive(Clone)]
pub struct BatchPlan {
    pub config: BatchConfig,
    pub operation: ItemOperation,
    pub rollback: Option<RollbackOperation>,
    pub precheck: Option<Precheck>,
}

impl BatchPlan {
    pub fn new(config: BatchConfig, operation: ItemOperation) -> Self {
        Self {
            config,
            operation,
            rollback: None,
            precheck: None,
        }
    }

    /// Compensation applied when an atomic batch partially fails
    pub fn with_rollback(mut self, rollback: RollbackOperation) -> Self {
        self.rollback = Some(rollback);
        self
    }

    /// Probe applied before execution when the batch is atomic
    pub fn with_precheck(mut self, ids: Vec<String>, exists: ExistsCheck) -> Self {
        self.precheck = Some(Precheck { ids, exists });
        self
    }
}

/// Runs batch plans
#[derive(Clone)]
pub struct BatchOrchestrator {
    pool: Arc<dyn Executor>,
    sequential: Arc<dyn Executor>,
    validator: AtomicPreValidator,
    rollback: RollbackCoordinator,
    metrics: Arc<BatchMetrics>,
}

impl BatchOrchestrator {
    /// Orchestrator with the default executors
    pub fn new(metrics: Arc<BatchMetrics>) -> Self {
        Self::with_executors(
            Arc::new(PoolExecutor::new()),
            Arc::new(SequentialExecutor::new()),
            metrics,
        )
    }

    /// Orchestrator with explicit executors
    pub fn with_executors(
        pool: Arc<dyn Executor>,
        sequential: Arc<dyn Executor>,
        metrics: Arc<BatchMetrics>,
    ) -> Self {
        Self {
            pool,
            sequential,
            validator: AtomicPreValidator::new(),
            rollback: RollbackCoordinator::new(),
            metrics,
        }
    }

    pub fn metrics(&self) -> &Arc<BatchMetrics> {
        &self.metrics
    }

    /// Run one batch
    ///
    /// Size violations return a validation error without invoking any item.
    /// Every call, rejected or not, records exactly one metric.
    pub async fn run(&self, cancel: &CancellationToken, plan: BatchPlan) -> Result<BatchResponse> {
        let this = self.clone();
        let cancel = cancel.clone();
        let operation = plan.config.operation_name.clone();
        tokio::spawn(async move { this.run_phases(&cancel, plan).await })
            .await
            .map_err(|e| {
                warn!(operation = %operation, error = %e, "batch task did not complete");
                GatewayError::internal(format!("batch task failed: {}", e))
            })?
    }

    async fn run_phases(
        &self,
        cancel: &CancellationToken,
        plan: BatchPlan,
    ) -> Result<BatchResponse> {
        let started = Instant::now();
        let BatchPlan {
            config,
            operation,
            rollback,
            precheck,
        } = plan;

        if let Err(e) = validate_batch_size(config.item_count) {
            warn!(
                operation = %config.operation_name,
                count = config.item_count,
                "batch rejected: {}", e
            );
            self.record(&config, started, 0, 0, BatchOutcome::Rejected);
            return Err(e);
        }

        if config.atomic {
            if let Some(precheck) = &precheck {
                if !self
                    .validator
                    .all_exist(cancel, &precheck.ids, &precheck.exists)
                    .await
                {
                    warn!(
                        operation = %config.operation_name,
                        count = config.item_count,
                        "atomic pre-check failed, nothing executed"
                    );
                    let report = AtomicPreValidator::failure_report(config.item_count);
                    return Ok(self.finish(&config, started, report, BatchOutcome::Failed));
                }
            }
        }

        let executor = if config.use_worker_pool {
            &self.pool
        } else {
            &self.sequential
        };
        debug!(
            operation = %config.operation_name,
            executor = executor.name(),
            count = config.item_count,
            "executing batch"
        );
        let mut report = executor.run(cancel, config.item_count, operation).await;

        let mut outcome = outcome_of(&report);
        if config.atomic && report.failure_count > 0 && report.success_count > 0 {
            match &rollback {
                Some(rollback) => {
                    report = self
                        .rollback
                        .roll_back(&config.operation_name, report, rollback)
                        .await;
                    outcome = BatchOutcome::RolledBack;
                }
                None => warn!(
                    operation = %config.operation_name,
                    "atomic batch partially failed without a rollback operation"
                ),
            }
        }

        Ok(self.finish(&config, started, report, outcome))
    }

    fn finish(
        &self,
        config: &BatchConfig,
        started: Instant,
        report: ExecutionReport,
        outcome: BatchOutcome,
    ) -> BatchResponse {
        let response = report.into_response();
        self.record(
            config,
            started,
            response.success_count,
            response.failure_count,
            outcome,
        );

        info!(
            operation = %config.operation_name,
            atomic = config.atomic,
            count = config.item_count,
            success_count = response.success_count,
            failure_count = response.failure_count,
            status = response.status_code(),
            "batch completed"
        );
        response
    }

    fn record(
        &self,
        config: &BatchConfig,
        started: Instant,
        success_count: usize,
        failure_count: usize,
        outcome: BatchOutcome,
    ) {
        self.metrics.record(BatchMetricRecord {
            operation: config.operation_name.clone(),
            atomic: config.atomic,
            item_count: config.item_count,
            duration_ms: started.elapsed().as_millis() as u64,
            success_count,
            failure_count,
            outcome,
            recorded_at: chrono::Utc::now(),
        });
    }
}

fn outcome_of(report: &ExecutionReport) -> BatchOutcome {
    if report.failure_count == 0 {
        BatchOutcome::Succeeded
    } else if report.success_count == 0 {
        BatchOutcome::Failed
    } else {
        BatchOutcome::PartiallySucceeded
    }
}
