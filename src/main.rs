//! O2-IMS Gateway binary
//!
//! Loads configuration, installs logging and serves the batch API.

use clap::Parser;
use o2ims_gateway::config::Config;
use o2ims_gateway::server;
use o2ims_gateway::utils::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;

/// Command line options
#[derive(Debug, Parser)]
#[command(name = "gateway", version, about = "O2-IMS batch gateway")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(
        short,
        long,
        env = "GATEWAY_CONFIG",
        default_value = "config/gateway.yaml"
    )]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match Config::load(&cli.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(config.logging()) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Display, not Debug, to keep multi-line messages readable
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
