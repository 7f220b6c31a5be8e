//! Fleet MCP Server - Main entry point

use anyhow::Result;
use fleet_mcp_server::client::{AsyncFleetClient, AsyncFleetClientImpl};
use fleet_mcp_server::repositories::BackendRepository;
use fleet_mcp_server::server::{FleetRepositories, ServerSettings};
use fleet_mcp_server::{
    Config, Driver, FleetClient, FleetMcpServer, InventoryPart, MaintenanceTask, Metrics, Vehicle,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load configuration first so LOG_LEVEL can seed the filter
    let config = Config::from_env();

    // stderr only; stdout carries MCP traffic
    let default_level = config
        .as_ref()
        .map(|c| c.log_level.clone())
        .unwrap_or_else(|_| "error".to_string());
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = match config {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!("Starting Fleet MCP Server with API URL: {}", config.fleet_api_url);

    let metrics = Metrics::new();
    let sync_client = FleetClient::new(&config, metrics.clone());
    let client = Arc::new(AsyncFleetClientImpl::new(sync_client)) as Arc<dyn AsyncFleetClient>;

    let repos = FleetRepositories {
        vehicles: Arc::new(BackendRepository::<Vehicle>::new(client.clone())),
        drivers: Arc::new(BackendRepository::<Driver>::new(client.clone())),
        parts: Arc::new(BackendRepository::<InventoryPart>::new(client.clone())),
        tasks: Arc::new(BackendRepository::<MaintenanceTask>::new(client)),
    };

    let settings = ServerSettings::from_config(&config);
    info!(
        "Inventory cache TTL: {} minutes, default phone country: {}",
        config.cache_ttl_minutes, settings.default_country
    );

    let server = FleetMcpServer::new(repos, metrics, settings);

    info!("Starting MCP server with stdio transport");
    fleet_mcp_server::server::run_server(server).await?;

    info!("Fleet MCP Server shutdown complete");
    Ok(())
}
