//! Resource pool models
//!
//! A resource pool groups compute/cluster resources at one location.

use crate::utils::error::{GatewayError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Maximum length of a resource pool name
pub const MAX_POOL_NAME_LENGTH: usize = 255;

/// Resource pool as stored by a backend adapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePool {
    /// Backend-assigned identifier
    pub resource_pool_id: String,
    /// Human readable name
    pub name: String,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Location label (site, region, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Global location identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_location_id: Option<String>,
    /// Adapter-specific extensions
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extensions: HashMap<String, serde_json::Value>,
}

/// Client payload for creating a resource pool
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourcePoolCreate {
    /// Optional client-chosen identifier; generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_pool_id: Option<String>,
    /// Human readable name
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_location_id: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extensions: HashMap<String, serde_json::Value>,
}

impl ResourcePoolCreate {
    /// Create a payload with just a name
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Validate the payload before it reaches a backend
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GatewayError::validation("resource pool name is required"));
        }
        if self.name.len() > MAX_POOL_NAME_LENGTH {
            return Err(GatewayError::validation(format!(
                "resource pool name exceeds {} characters",
                MAX_POOL_NAME_LENGTH
            )));
        }
        if let Some(id) = &self.resource_pool_id {
            if id.trim().is_empty() {
                return Err(GatewayError::validation(
                    "resourcePoolId cannot be empty when provided",
                ));
            }
        }
        Ok(())
    }

    /// Materialize the pool with its final identifier
    pub fn into_pool(self, resource_pool_id: String) -> ResourcePool {
        ResourcePool {
            resource_pool_id,
            name: self.name,
            description: self.description,
            location: self.location,
            global_location_id: self.global_location_id,
            extensions: self.extensions,
        }
    }
}
