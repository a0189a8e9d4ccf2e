//! Core functionality for the Gateway
//!
//! - `batch`: the batch-execution engine (executors, rollback, orchestration)
//! - `models`: O2-IMS inventory and subscription models
//! - `traits`: backend adapter seams

pub mod batch;
pub mod models;
pub mod traits;
