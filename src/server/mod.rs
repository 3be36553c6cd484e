//! MCP server for launcher search.
//!
//! Exposes the search service over the Model Context Protocol; the MCP
//! client plays the display layer.

pub mod handlers;

pub use handlers::LauncherMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the server over stdin/stdout until the client disconnects.
pub async fn run_server(server: LauncherMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
