//! Batch engine types

use crate::utils::error::GatewayError;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Smallest accepted batch
pub const MIN_BATCH_SIZE: usize = 1;
/// Largest accepted batch
pub const MAX_BATCH_SIZE: usize = 100;
/// Item operations in flight at once in the pool executor
pub const MAX_WORKERS: usize = 10;

/// Status assigned to items short-circuited by cancellation
pub const CANCELED_STATUS: u16 = 408;
/// Status assigned to successes undone by rollback
pub const ROLLED_BACK_STATUS: u16 = 409;
/// Status assigned to every item when the atomic pre-check fails
pub const PRECHECK_FAILED_STATUS: u16 = 412;

/// Why an item did not succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchErrorKind {
    /// The backend rejected the item
    BusinessFailure,
    /// The batch was cancelled before the item started
    Canceled,
    /// The item succeeded and was then compensated
    RolledBack,
    /// A delete target was missing during atomic pre-validation
    AtomicPrecheckFailure,
}

impl fmt::Display for BatchErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BatchErrorKind::BusinessFailure => "business failure",
            BatchErrorKind::Canceled => "canceled",
            BatchErrorKind::RolledBack => "rolled back",
            BatchErrorKind::AtomicPrecheckFailure => "atomic pre-check failure",
        };
        f.write_str(s)
    }
}

/// Per-item error payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchItemError {
    pub kind: BatchErrorKind,
    pub message: String,
}

impl BatchItemError {
    pub fn new<S: Into<String>>(kind: BatchErrorKind, message: S) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Outcome of one item
///
/// `data` is present iff `success`, `error` iff not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResult {
    /// Position of the item in the request
    pub index: usize,
    pub success: bool,
    pub status_code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<BatchItemError>,
}

impl BatchResult {
    /// Successful item carrying its payload
    pub fn success(index: usize, status_code: u16, data: serde_json::Value) -> Self {
        Self {
            index,
            success: true,
            status_code,
            data: Some(data),
            error: None,
        }
    }

    /// Failed item with an explicit kind and status
    pub fn failure<S: Into<String>>(
        index: usize,
        status_code: u16,
        kind: BatchErrorKind,
        message: S,
    ) -> Self {
        Self {
            index,
            success: false,
            status_code,
            data: None,
            error: Some(BatchItemError::new(kind, message)),
        }
    }

    /// Item rejected by its backend; the status is the error's HTTP status
    pub fn business_failure(index: usize, error: &GatewayError) -> Self {
        Self::failure(
            index,
            error.http_status(),
            BatchErrorKind::BusinessFailure,
            error.to_string(),
        )
    }

    /// Item skipped because the batch was cancelled
    pub fn canceled(index: usize) -> Self {
        Self::failure(
            index,
            CANCELED_STATUS,
            BatchErrorKind::Canceled,
            "batch canceled before the item started",
        )
    }

    /// Error kind, if the item failed
    pub fn error_kind(&self) -> Option<BatchErrorKind> {
        self.error.as_ref().map(|e| e.kind)
    }
}

/// Response of a batch call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    /// One entry per request item, index ordered
    pub results: Vec<BatchResult>,
    pub success: bool,
    pub success_count: usize,
    pub failure_count: usize,
}

impl BatchResponse {
    /// Build from results and counts
    pub fn new(results: Vec<BatchResult>, success_count: usize, failure_count: usize) -> Self {
        Self {
            results,
            success: failure_count == 0,
            success_count,
            failure_count,
        }
    }

    /// Overall HTTP status of the batch
    pub fn status_code(&self) -> u16 {
        super::aggregate::overall_status(self.success_count, self.failure_count)
    }
}

/// Static description of one batch call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchConfig {
    /// Name used in logs and metrics, e.g. `create_subscriptions`
    pub operation_name: String,
    pub atomic: bool,
    pub item_count: usize,
    /// Pool executor when true, sequential otherwise
    pub use_worker_pool: bool,
}

impl BatchConfig {
    pub fn new<S: Into<String>>(operation_name: S, item_count: usize) -> Self {
        Self {
            operation_name: operation_name.into(),
            atomic: false,
            item_count,
            use_worker_pool: true,
        }
    }

    pub fn with_atomic(mut self, atomic: bool) -> Self {
        self.atomic = atomic;
        self
    }

    pub fn with_worker_pool(mut self, use_worker_pool: bool) -> Self {
        self.use_worker_pool = use_worker_pool;
        self
    }
}

/// What an item operation hands back to the executor
#[derive(Debug, Clone, PartialEq)]
pub struct ItemOutcome {
    pub result: BatchResult,
    /// Identifier of the artifact created by this item, if any
    pub created_id: Option<String>,
}

impl ItemOutcome {
    pub fn new(result: BatchResult) -> Self {
        Self {
            result,
            created_id: None,
        }
    }

    pub fn created<S: Into<String>>(result: BatchResult, created_id: S) -> Self {
        Self {
            result,
            created_id: Some(created_id.into()),
        }
    }
}

impl From<BatchResult> for ItemOutcome {
    fn from(result: BatchResult) -> Self {
        Self::new(result)
    }
}

/// Per-item operation: `(cancel, index) -> outcome`
pub type ItemOperation =
    Arc<dyn Fn(CancellationToken, usize) -> BoxFuture<'static, ItemOutcome> + Send + Sync>;

/// Compensation over created identifiers, returning the failure count
pub type RollbackOperation =
    Arc<dyn Fn(CancellationToken, Vec<String>) -> BoxFuture<'static, usize> + Send + Sync>;

/// Existence probe used by the atomic pre-validator
pub type ExistsCheck =
    Arc<dyn Fn(CancellationToken, String) -> BoxFuture<'static, bool> + Send + Sync>;

/// Wrap an async closure as an [`ItemOperation`]
pub fn item_operation<F, Fut>(f: F) -> ItemOperation
where
    F: Fn(CancellationToken, usize) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = ItemOutcome> + Send + 'static,
{
    Arc::new(move |cancel, index| Box::pin(f(cancel, index)))
}

/// Wrap an async closure as a [`RollbackOperation`]
pub fn rollback_operation<F, Fut>(f: F) -> RollbackOperation
where
    F: Fn(CancellationToken, Vec<String>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = usize> + Send + 'static,
{
    Arc::new(move |cancel, ids| Box::pin(f(cancel, ids)))
}

/// Wrap an async closure as an [`ExistsCheck`]
pub fn exists_check<F, Fut>(f: F) -> ExistsCheck
where
    F: Fn(CancellationToken, String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    Arc::new(move |cancel, id| Box::pin(f(cancel, id)))
}

/// Executor output
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExecutionReport {
    pub results: Vec<BatchResult>,
    pub success_count: usize,
    pub failure_count: usize,
    /// Identifiers created by successful items (pool executor only)
    pub created_ids: Vec<String>,
}

impl ExecutionReport {
    pub fn into_response(self) -> BatchResponse {
        BatchResponse::new(self.results, self.success_count, self.failure_count)
    }
}
