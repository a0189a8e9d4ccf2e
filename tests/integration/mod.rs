//! Integration tests for o2ims-gateway
//!
//! These tests drive the batch families through real backends and verify
//! the engine's observable guarantees.

pub mod batch_engine_tests;
pub mod config_tests;
pub mod error_handling_tests;
