//! Batch operation families
//!
//! One method per family. Creation families run on the worker pool and are
//! compensated on atomic partial failure; deletion families run sequentially
//! and are pre-validated when atomic.

mod resource_pools;
mod subscriptions;

use crate::core::batch::{BatchOrchestrator, BatchResult, ExistsCheck, ItemOutcome, exists_check};
use crate::core::traits::{ResourcePoolAdapter, SubscriptionStore};
use crate::monitoring::BatchMetrics;
use crate::storage::{MemoryResourcePoolAdapter, MemorySubscriptionStore};
use crate::utils::error::{GatewayError, Result};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tracing::warn;

/// Operation names used in logs and metrics
pub mod operations {
    pub const CREATE_SUBSCRIPTIONS: &str = "create_subscriptions";
    pub const DELETE_SUBSCRIPTIONS: &str = "delete_subscriptions";
    pub const CREATE_RESOURCE_POOLS: &str = "create_resource_pools";
    pub const DELETE_RESOURCE_POOLS: &str = "delete_resource_pools";
}

/// Batch operations over the configured backends
#[derive(Clone)]
pub struct BatchService {
    orchestrator: Arc<BatchOrchestrator>,
    resource_pools: Arc<dyn ResourcePoolAdapter>,
    subscriptions: Arc<dyn SubscriptionStore>,
}

impl BatchService {
    pub fn new(
        orchestrator: Arc<BatchOrchestrator>,
        resource_pools: Arc<dyn ResourcePoolAdapter>,
        subscriptions: Arc<dyn SubscriptionStore>,
    ) -> Self {
        Self {
            orchestrator,
            resource_pools,
            subscriptions,
        }
    }

    /// Service over fresh in-memory backends
    pub fn in_memory(metrics: Arc<BatchMetrics>) -> Self {
        Self::new(
            Arc::new(BatchOrchestrator::new(metrics)),
            Arc::new(MemoryResourcePoolAdapter::new()),
            Arc::new(MemorySubscriptionStore::new()),
        )
    }

    pub fn orchestrator(&self) -> &Arc<BatchOrchestrator> {
        &self.orchestrator
    }
}

/// Item outcome for a finished backend call
fn outcome_from<T, F>(index: usize, status_code: u16, result: Result<T>, describe: F) -> ItemOutcome
where
    F: FnOnce(&T) -> (serde_json::Value, Option<String>),
{
    match result {
        Ok(value) => {
            let (data, created_id) = describe(&value);
            ItemOutcome {
                result: BatchResult::success(index, status_code, data),
                created_id,
            }
        }
        Err(e) => BatchResult::business_failure(index, &e).into(),
    }
}

/// Result data for a created object; serialization failures are logged and
/// leave the result without data
fn item_data<T: Serialize>(kind: &'static str, value: &T) -> serde_json::Value {
    serde_json::to_value(value).unwrap_or_else(|e| {
        warn!(kind, error = %e, "failed to serialize created item, returning no data");
        serde_json::Value::Null
    })
}

/// Failure for an index the family has no item for
fn missing_item(index: usize) -> ItemOutcome {
    BatchResult::business_failure(
        index,
        &GatewayError::internal(format!("no batch item at index {}", index)),
    )
    .into()
}

/// Existence probe from a backend lookup; lookup errors count as missing
fn lookup_probe<F, Fut, T>(kind: &'static str, lookup: F) -> ExistsCheck
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T>> + Send + 'static,
    T: Send + 'static,
{
    let lookup = Arc::new(lookup);
    exists_check(move |_cancel, id| {
        let lookup = lookup.clone();
        async move {
            match lookup(id.clone()).await {
                Ok(_) => true,
                Err(e) if e.is_not_found() => false,
                Err(e) => {
                    warn!(kind, id = %id, error = %e, "existence probe failed, treating target as missing");
                    false
                }
            }
        }
    })
}
