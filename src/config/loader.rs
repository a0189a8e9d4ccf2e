//! Configuration loading utilities
//!
//! Environment overrides applied on top of file or default configuration.

use super::models::*;
use crate::utils::error::{GatewayError, Result};
use std::env;
use tracing::debug;

impl GatewayConfig {
    /// Apply `GATEWAY_*` environment variables
    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("GATEWAY_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("GATEWAY_PORT") {
            self.server.port = port
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Some(workers) = lookup("GATEWAY_WORKERS") {
            self.server.workers = Some(
                workers
                    .parse()
                    .map_err(|e| GatewayError::Config(format!("Invalid workers count: {}", e)))?,
            );
        }
        if let Some(timeout) = lookup("GATEWAY_TIMEOUT") {
            self.server.timeout = timeout
                .parse()
                .map_err(|e| GatewayError::Config(format!("Invalid timeout: {}", e)))?;
        }
        if let Some(level) = lookup("GATEWAY_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = lookup("GATEWAY_LOG_FORMAT") {
            self.logging.format = format.parse()?;
        }

        debug!("Environment overrides applied");
        Ok(self)
    }
}
