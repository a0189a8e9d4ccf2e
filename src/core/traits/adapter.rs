//! Resource pool adapter trait

use crate::core::models::{ResourcePool, ResourcePoolCreate};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Backend adapter managing resource pools
///
/// Errors follow the gateway taxonomy: a missing pool is
/// [`GatewayError::NotFound`](crate::utils::error::GatewayError::NotFound),
/// an identifier clash is `Conflict`, a rejected payload is `Validation`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResourcePoolAdapter: Send + Sync {
    /// Create one resource pool
    async fn create_resource_pool(&self, pool: ResourcePoolCreate) -> Result<ResourcePool>;

    /// Fetch one resource pool
    async fn get_resource_pool(&self, resource_pool_id: &str) -> Result<ResourcePool>;

    /// Delete one resource pool
    async fn delete_resource_pool(&self, resource_pool_id: &str) -> Result<()>;
}
