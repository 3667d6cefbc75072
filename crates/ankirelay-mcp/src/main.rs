//! MCP server for an Anki collection via AnkiConnect.
//!
//! Exposes search, note, tag, card-state, reviewer and deck-config tools, plus
//! read-only `collection://` resources, to LLM assistants.

mod resources;
mod server;

use std::sync::Arc;

use ankirelay_engine::ClientBuilder;
use clap::Parser;
use rmcp::ServiceExt;
use tracing::info;

use server::AnkiServer;

// ============================================================================
// CLI Arguments
// ============================================================================

/// MCP server for an Anki collection via AnkiConnect.
#[derive(Parser, Debug)]
#[command(name = "ankirelay-mcp")]
#[command(version, about, long_about = None)]
struct Args {
    /// AnkiConnect endpoint URL
    #[arg(long, default_value = "http://localhost:8765")]
    anki_connect: String,

    /// AnkiConnect API key, if the add-on requires one
    #[arg(long)]
    api_key: Option<String>,

    /// Serve streamable HTTP on this address (e.g. 127.0.0.1:3000) instead of stdio
    #[arg(long, value_name = "ADDR")]
    http: Option<String>,

    /// Read-only mode (disables write operations)
    #[arg(long, default_value_t = false)]
    read_only: bool,

    /// Enable verbose logging (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Args {
    fn log_level(&self) -> tracing::Level {
        match self.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

// ============================================================================
// Main
// ============================================================================

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // stdout carries the stdio transport
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .with_writer(std::io::stderr)
        .init();

    info!(
        anki_url = %args.anki_connect,
        read_only = args.read_only,
        http = ?args.http,
        "Starting ankirelay-mcp server"
    );

    let mut builder = ClientBuilder::new().url(&args.anki_connect);
    if let Some(key) = &args.api_key {
        builder = builder.api_key(key);
    }
    let server = AnkiServer::new(builder.build()?, args.read_only);
    server.probe().await;

    match args.http {
        None => {
            let transport = (tokio::io::stdin(), tokio::io::stdout());
            let mcp_server = server.serve(transport).await?;
            mcp_server.waiting().await?;
        }
        Some(bind_addr) => {
            use rmcp::transport::streamable_http_server::{
                StreamableHttpServerConfig, StreamableHttpService,
                session::local::LocalSessionManager,
            };

            let service: StreamableHttpService<AnkiServer, LocalSessionManager> =
                StreamableHttpService::new(
                    move || Ok(server.clone()),
                    Arc::new(LocalSessionManager::default()),
                    StreamableHttpServerConfig::default(),
                );

            let router = axum::Router::new().nest_service("/mcp", service);
            let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
            info!(bind_addr = %bind_addr, "MCP server listening on HTTP");

            axum::serve(listener, router).await?;
        }
    }

    Ok(())
}
