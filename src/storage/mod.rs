//! Storage backends
//!
//! In-memory implementations of the backend traits. They back the default
//! server wiring and the test-suite.

pub mod memory;

pub use memory::{MemoryResourcePoolAdapter, MemorySubscriptionStore};
