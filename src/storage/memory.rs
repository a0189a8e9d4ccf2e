//! In-memory backends on `DashMap`

use crate::core::models::{ResourcePool, ResourcePoolCreate, Subscription, SubscriptionCreate};
use crate::core::traits::{ResourcePoolAdapter, SubscriptionStore};
use crate::utils::error::{GatewayError, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tracing::debug;
use uuid::Uuid;

/// Resource pool adapter keeping pools in memory
#[derive(Debug, Default)]
pub struct MemoryResourcePoolAdapter {
    pools: DashMap<String, ResourcePool>,
}

impl MemoryResourcePoolAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored pools
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn contains(&self, resource_pool_id: &str) -> bool {
        self.pools.contains_key(resource_pool_id)
    }
}

#[async_trait]
impl ResourcePoolAdapter for MemoryResourcePoolAdapter {
    async fn create_resource_pool(&self, pool: ResourcePoolCreate) -> Result<ResourcePool> {
        pool.validate()?;

        let id = pool
            .resource_pool_id
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        match self.pools.entry(id.clone()) {
            Entry::Occupied(_) => Err(GatewayError::conflict(format!(
                "resource pool {} already exists",
                id
            ))),
            Entry::Vacant(slot) => {
                let created = pool.into_pool(id);
                slot.insert(created.clone());
                debug!(resource_pool_id = %created.resource_pool_id, "resource pool created");
                Ok(created)
            }
        }
    }

    async fn get_resource_pool(&self, resource_pool_id: &str) -> Result<ResourcePool> {
        self.pools
            .get(resource_pool_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                GatewayError::not_found(format!("resource pool {} not found", resource_pool_id))
            })
    }

    async fn delete_resource_pool(&self, resource_pool_id: &str) -> Result<()> {
        match self.pools.remove(resource_pool_id) {
            Some(_) => {
                debug!(resource_pool_id, "resource pool deleted");
                Ok(())
            }
            None => Err(GatewayError::not_found(format!(
                "resource pool {} not found",
                resource_pool_id
            ))),
        }
    }
}

/// Subscription store keeping subscriptions in memory
#[derive(Debug, Default)]
pub struct MemorySubscriptionStore {
    subscriptions: DashMap<String, Subscription>,
}

impl MemorySubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    pub fn contains(&self, subscription_id: &str) -> bool {
        self.subscriptions.contains_key(subscription_id)
    }
}

#[async_trait]
impl SubscriptionStore for MemorySubscriptionStore {
    async fn create(&self, subscription: SubscriptionCreate) -> Result<Subscription> {
        subscription.validate()?;

        let created = subscription.into_subscription(Uuid::new_v4().to_string());
        self.subscriptions
            .insert(created.subscription_id.clone(), created.clone());
        debug!(subscription_id = %created.subscription_id, "subscription created");
        Ok(created)
    }

    async fn get(&self, subscription_id: &str) -> Result<Subscription> {
        self.subscriptions
            .get(subscription_id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| {
                GatewayError::not_found(format!("subscription {} not found", subscription_id))
            })
    }

    async fn delete(&self, subscription_id: &str) -> Result<()> {
        self.subscriptions
            .remove(subscription_id)
            .map(|_| ())
            .ok_or_else(|| {
                GatewayError::not_found(format!("subscription {} not found", subscription_id))
            })
    }
}
