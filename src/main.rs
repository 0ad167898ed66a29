// SPDX-License-Identifier: MIT

//! Strava-MCP Server
//!
//! Serves the Strava OAuth and activity tools over MCP stdio. Logging
//! goes to stderr; stdout belongs to the JSON-RPC transport.

use std::sync::Arc;
use strava_mcp::{Config, FileTokenStore, McpServer, StravaAdapter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(
        token_store = %config.token_store_path.display(),
        client_id_configured = config.client_id.is_some(),
        "Starting Strava MCP server"
    );

    let store = Arc::new(FileTokenStore::new(config.token_store_path.clone()));
    let adapter = StravaAdapter::new(config, store);

    McpServer::new(adapter).serve_stdio().await
}

/// Initialize structured logging on stderr.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("strava_mcp=debug,info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
