//! Inventory and subscription models for the Gateway

pub mod resource_pool;
pub mod subscription;

pub use resource_pool::{ResourcePool, ResourcePoolCreate};
pub use subscription::{Subscription, SubscriptionCreate};
