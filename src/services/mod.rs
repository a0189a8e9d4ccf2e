//! Business services
//!
//! Services wire the batch engine to concrete backends.

pub mod batch;

pub use batch::BatchService;
