//! MCP server for fleet management.
//!
//! Exposes the tools over the Model Context Protocol on stdio.

pub mod handlers;

pub use handlers::{FleetMcpServer, FleetRepositories, ServerSettings};

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Serve `server` over stdin/stdout until the client disconnects.
pub async fn run_server(server: FleetMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;

    Ok(())
}
