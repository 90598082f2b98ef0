//! # Wise MCP Server
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the Wise HTTP client
//! - Create the Wise service
//! - Serve the MCP tools on stdio

mod config;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wise_client::WiseClient;
use wise_hex::{
    WiseService,
    inbound::{McpServer, ToolDefaults},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // stdout carries the protocol, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wise_hex=debug,wise_mcp=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load configuration
    let config = config::Config::from_env()?;
    let wise_config = config.wise_config();

    tracing::info!(
        sandbox = config.is_sandbox,
        base_url = %wise_config.base_url,
        default_profile_type = %config.default_profile_type,
        "Starting Wise MCP server"
    );

    // Build the API client and service
    let client = WiseClient::new(wise_config)?;
    let service = WiseService::new(client);

    let server = McpServer::with_defaults(
        service,
        ToolDefaults {
            profile_type: config.default_profile_type,
        },
    );
    server.run_stdio().await?;

    tracing::info!("Wise MCP server stopped");
    Ok(())
}
