//! Subscription store trait

use crate::core::models::{Subscription, SubscriptionCreate};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Persistence for subscriptions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// Store a new subscription
    async fn create(&self, subscription: SubscriptionCreate) -> Result<Subscription>;

    /// Fetch a subscription
    async fn get(&self, subscription_id: &str) -> Result<Subscription>;

    /// Remove a subscription
    async fn delete(&self, subscription_id: &str) -> Result<()>;
}
