//! Instrumented backends
//!
//! Wrap the in-memory backends with optional latency, per-id failure
//! injection and call counters.

use async_trait::async_trait;
use o2ims_gateway::core::models::{
    ResourcePool, ResourcePoolCreate, Subscription, SubscriptionCreate,
};
use o2ims_gateway::core::traits::{ResourcePoolAdapter, SubscriptionStore};
use o2ims_gateway::storage::{MemoryResourcePoolAdapter, MemorySubscriptionStore};
use o2ims_gateway::utils::error::{GatewayError, Result};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Tracks concurrent calls and the observed peak
#[derive(Debug, Default)]
pub struct ConcurrencyGauge {
    current: AtomicUsize,
    peak: AtomicUsize,
}

impl ConcurrencyGauge {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// Resource pool adapter with latency, failures and counters
#[derive(Debug, Default)]
pub struct InstrumentedPoolAdapter {
    pub inner: MemoryResourcePoolAdapter,
    pub latency: Option<Duration>,
    /// Pool names whose creation fails with a backend error
    pub failing_names: HashSet<String>,
    /// Ids whose deletion fails with a backend error
    pub failing_deletes: HashSet<String>,
    pub gauge: ConcurrencyGauge,
    pub creates: AtomicUsize,
    pub deletes: Mutex<Vec<String>>,
}

impl InstrumentedPoolAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    pub fn failing_create(mut self, name: &str) -> Self {
        self.failing_names.insert(name.to_string());
        self
    }

    pub fn failing_delete(mut self, id: &str) -> Self {
        self.failing_deletes.insert(id.to_string());
        self
    }

    pub fn create_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> Vec<String> {
        self.deletes.lock().clone()
    }

    async fn pause(&self) {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl ResourcePoolAdapter for InstrumentedPoolAdapter {
    async fn create_resource_pool(&self, pool: ResourcePoolCreate) -> Result<ResourcePool> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.gauge.enter();
        self.pause().await;
        let result = if self.failing_names.contains(&pool.name) {
            Err(GatewayError::backend(format!(
                "adapter refused pool {}",
                pool.name
            )))
        } else {
            self.inner.create_resource_pool(pool).await
        };
        self.gauge.exit();
        result
    }

    async fn get_resource_pool(&self, resource_pool_id: &str) -> Result<ResourcePool> {
        self.inner.get_resource_pool(resource_pool_id).await
    }

    async fn delete_resource_pool(&self, resource_pool_id: &str) -> Result<()> {
        self.deletes.lock().push(resource_pool_id.to_string());
        if self.failing_deletes.contains(resource_pool_id) {
            return Err(GatewayError::unavailable("adapter offline"));
        }
        self.inner.delete_resource_pool(resource_pool_id).await
    }
}

/// Subscription store with counters
#[derive(Debug, Default)]
pub struct InstrumentedSubscriptionStore {
    pub inner: MemorySubscriptionStore,
    pub creates: AtomicUsize,
    pub gets: AtomicUsize,
    pub deletes: AtomicUsize,
}

impl InstrumentedSubscriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total backend calls of any kind
    pub fn total_calls(&self) -> usize {
        self.creates.load(Ordering::SeqCst)
            + self.gets.load(Ordering::SeqCst)
            + self.deletes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SubscriptionStore for InstrumentedSubscriptionStore {
    async fn create(&self, subscription: SubscriptionCreate) -> Result<Subscription> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        self.inner.create(subscription).await
    }

    async fn get(&self, subscription_id: &str) -> Result<Subscription> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.inner.get(subscription_id).await
    }

    async fn delete(&self, subscription_id: &str) -> Result<()> {
        self.deletes.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(subscription_id).await
    }
}
