//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::monitoring::BatchMetrics;
use crate::services::BatchService;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are cheap to clone; actix clones the state into every worker.
#[derive(Clone)]
pub struct AppState {
    /// Gateway configuration (shared read-only)
    pub config: Arc<Config>,
    /// Batch operation families
    pub batch: BatchService,
    /// Batch metrics, shared with the orchestrator
    pub metrics: Arc<BatchMetrics>,
}

impl AppState {
    /// State backed by in-memory backends
    pub fn new(config: Config) -> Self {
        let metrics = Arc::new(BatchMetrics::new());
        let batch = BatchService::in_memory(metrics.clone());
        Self::with_service(config, batch, metrics)
    }

    /// State over an explicit batch service
    pub fn with_service(config: Config, batch: BatchService, metrics: Arc<BatchMetrics>) -> Self {
        Self {
            config: Arc::new(config),
            batch,
            metrics,
        }
    }

    /// Get gateway configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
