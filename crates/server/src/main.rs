//! govq MCP server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use anyhow::{Context, Result};
use govq_client::{AskClient, AskConfig};
use govq_core::{AppConfig, SearchHistoryStore, SqliteStorage};
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let config = AppConfig::load()?;

    let storage = SqliteStorage::open(&config.db_path)
        .with_context(|| format!("failed to open history database at {}", config.db_path.display()))?;
    let history = SearchHistoryStore::load(storage);
    let client = AskClient::new(&AskConfig::from(&config))?;

    tracing::info!(
        endpoint = %client.endpoint(),
        db_path = %config.db_path.display(),
        recent = history.len(),
        "Starting govq server on stdio transport"
    );

    let handler = handler::GovqServer::new(history, client, config);
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
