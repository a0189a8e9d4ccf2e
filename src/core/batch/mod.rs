//! Batch execution engine
//!
//! Runs N homogeneous item operations under a bounded concurrency budget,
//! aggregates per-item results and, for atomic batches, guarantees an
//! all-or-nothing outcome: deletes are pre-validated, creates are compensated.

pub mod aggregate;
pub mod executor;
pub mod orchestrator;
pub mod rollback;
pub mod types;
pub mod validation;


pub use aggregate::{ResultAggregator, overall_status};
pub use executor::{Executor, PoolExecutor, SequentialExecutor};
pub use orchestrator::{BatchOrchestrator, BatchPlan, Precheck};
pub use rollback::{RollbackCoordinator, compensate};
pub use types::*;
pub use validation::{AtomicPreValidator, validate_batch_size};
