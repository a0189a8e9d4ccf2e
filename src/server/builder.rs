//! Server builder and run_server function

use crate::config::Config;
use crate::server::routes::batch::BATCH_SCOPE;
use crate::server::server::HttpServer;
use crate::server::state::AppState;
use crate::utils::error::{GatewayError, Result};
use tracing::info;

/// Server builder for easier configuration
#[derive(Default)]
pub struct ServerBuilder {
    config: Option<Config>,
    state: Option<AppState>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Use prepared state instead of in-memory backends
    pub fn with_state(mut self, state: AppState) -> Self {
        self.state = Some(state);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        if let Some(state) = self.state {
            return Ok(HttpServer::with_state(state));
        }

        let config = self
            .config
            .ok_or_else(|| GatewayError::config("Configuration is required"))?;
        Ok(HttpServer::new(&config))
    }
}

/// Run the server with a loaded configuration
pub async fn run_server(config: Config) -> Result<()> {
    info!("Starting O2-IMS Gateway v{}", crate::VERSION);

    let server = ServerBuilder::new().with_config(config).build()?;
    info!("Server starting at: http://{}", server.config().address());
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /metrics/batch - Batch metrics");
    info!("   POST {}/subscriptions - Batch create subscriptions", BATCH_SCOPE);
    info!("   POST {}/subscriptions/delete - Batch delete subscriptions", BATCH_SCOPE);
    info!("   POST {}/resourcePools - Batch create resource pools", BATCH_SCOPE);
    info!("   POST {}/resourcePools/delete - Batch delete resource pools", BATCH_SCOPE);

    server.start().await
}
