//! Common test utilities for o2ims-gateway
//!
//! - Payload factories
//! - Instrumented backends wrapping the in-memory ones

pub mod backends;
pub mod fixtures;

pub use backends::{InstrumentedPoolAdapter, InstrumentedSubscriptionStore};
pub use fixtures::{ResourcePoolFactory, SubscriptionFactory};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}
