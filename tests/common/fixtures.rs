//! Payload factories

use o2ims_gateway::core::models::{ResourcePoolCreate, SubscriptionCreate};
use uuid::Uuid;

/// Factory for resource pool payloads
pub struct ResourcePoolFactory;

impl ResourcePoolFactory {
    /// Pool with a generated name and no explicit id
    pub fn create() -> ResourcePoolCreate {
        ResourcePoolCreate::named(format!("pool-{}", &Uuid::new_v4().to_string()[..8]))
    }

    /// Pool with an explicit id
    pub fn with_id(id: &str) -> ResourcePoolCreate {
        ResourcePoolCreate {
            resource_pool_id: Some(id.to_string()),
            location: Some("edge-site-1".to_string()),
            ..ResourcePoolCreate::named(format!("pool-{}", id))
        }
    }

    /// Pool the backend rejects as invalid
    pub fn invalid() -> ResourcePoolCreate {
        ResourcePoolCreate::named("")
    }

    /// `count` pools with ids `prefix-0..count`
    pub fn batch(prefix: &str, count: usize) -> Vec<ResourcePoolCreate> {
        (0..count)
            .map(|n| Self::with_id(&format!("{}-{}", prefix, n)))
            .collect()
    }
}

/// Factory for subscription payloads
pub struct SubscriptionFactory;

impl SubscriptionFactory {
    pub fn create() -> SubscriptionCreate {
        SubscriptionCreate {
            callback: format!(
                "https://smo.example.com/notify/{}",
                &Uuid::new_v4().to_string()[..8]
            ),
            consumer_subscription_id: Some(Uuid::new_v4().to_string()),
            filter: None,
        }
    }

    /// Subscription whose callback fails validation
    pub fn invalid() -> SubscriptionCreate {
        SubscriptionCreate::with_callback("mailto:ops@example.com")
    }

    pub fn batch(count: usize) -> Vec<SubscriptionCreate> {
        (0..count).map(|_| Self::create()).collect()
    }
}
