//! Subscription models
//!
//! A subscription registers a consumer callback for inventory change events.

use crate::utils::error::{GatewayError, Result};
use crate::utils::is_valid_http_url;
use serde::{Deserialize, Serialize};

/// Stored subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Gateway-assigned identifier
    pub subscription_id: String,
    /// Consumer callback URL
    pub callback: String,
    /// Consumer's own identifier for the subscription
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_subscription_id: Option<String>,
    /// Event filter expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

/// Client payload for creating a subscription
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionCreate {
    pub callback: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consumer_subscription_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl SubscriptionCreate {
    /// Create a payload with just a callback
    pub fn with_callback<S: Into<String>>(callback: S) -> Self {
        Self {
            callback: callback.into(),
            ..Default::default()
        }
    }

    /// Validate the payload before it reaches the store
    pub fn validate(&self) -> Result<()> {
        if self.callback.trim().is_empty() {
            return Err(GatewayError::validation("callback is required"));
        }
        if !is_valid_http_url(&self.callback) {
            return Err(GatewayError::validation(format!(
                "callback must be an absolute http(s) URL: {}",
                self.callback
            )));
        }
        Ok(())
    }

    /// Materialize the subscription with its final identifier
    pub fn into_subscription(self, subscription_id: String) -> Subscription {
        Subscription {
            subscription_id,
            callback: self.callback,
            consumer_subscription_id: self.consumer_subscription_id,
            filter: self.filter,
        }
    }
}
