//! # O2-IMS Gateway
//!
//! Infrastructure-management gateway exposing O2-IMS batch APIs over
//! pluggable backend adapters.
//!
//! ## Features
//!
//! - **Batch engine**: bounded-concurrency execution of up to 100 homogeneous
//!   operations with per-item results
//! - **Atomic batches**: deletes are pre-validated, creates are compensated
//! - **Pluggable backends**: resource pools and subscriptions behind async traits
//! - **Observability**: structured `tracing` logs and in-process batch metrics
//!
//! ## Embedding the engine
//!
//! ```rust,no_run
//! use o2ims_gateway::core::models::SubscriptionCreate;
//! use o2ims_gateway::monitoring::BatchMetrics;
//! use o2ims_gateway::services::BatchService;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = BatchService::in_memory(Arc::new(BatchMetrics::new()));
//!     let response = service
//!         .create_subscriptions(
//!             &CancellationToken::new(),
//!             vec![SubscriptionCreate::with_callback("https://smo.example.com/notify")],
//!             true,
//!         )
//!         .await?;
//!     println!("status {}", response.status_code());
//!     Ok(())
//! }
//! ```
//!
//! ## Gateway Mode
//!
//! ```rust,no_run
//! use o2ims_gateway::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config/gateway.yaml").await?;
//!     Gateway::new(config).run().await?;
//!     Ok(())
//! }
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod monitoring;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::batch::{BatchOrchestrator, BatchResponse, BatchResult};
pub use services::BatchService;
pub use utils::error::{GatewayError, Result};

use tracing::info;

/// The O2-IMS gateway: configuration plus the HTTP server
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub fn new(config: Config) -> Self {
        info!("Creating new gateway instance");
        let server = server::HttpServer::new(&config);
        Self { config, server }
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting O2-IMS Gateway");
        info!("Configuration: {:?}", self.config);

        self.server.start().await
    }
}

// Version information
/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
/// Description of the crate
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Gateway build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp (unix seconds)
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self {
            version: VERSION,
            build_time: option_env!("BUILD_TIME").unwrap_or("unknown"),
            git_hash: option_env!("GIT_HASH").unwrap_or("unknown"),
        }
    }
}

/// Build information baked in by the build script
pub fn build_info() -> BuildInfo {
    BuildInfo::default()
}
