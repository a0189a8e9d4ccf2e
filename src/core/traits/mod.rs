//! Core traits module
//!
//! Backend seams the batch families call into. Implementations live in
//! `storage` (in-memory) or in external adapters.

pub mod adapter;
pub mod subscription;

pub use adapter::*;
pub use subscription::*;
