use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use rmcp::ServiceExt;
use rmcp::transport::stdio;
use tracing_subscriber::EnvFilter;

use booking_csv::adapters::scraper::client::BookingClient;
use booking_csv::adapters::scraper::listing_parser::ListingExtractor;
use booking_csv::config::load_config;
use booking_csv::config::types::Transport;
use booking_csv::http::{self, AppState};
use booking_csv::mcp::server::BookingMcpServer;
use booking_csv::pipeline::ScrapePipeline;

fn find_config_path() -> PathBuf {
    // Check common locations for config file
    let candidates = [PathBuf::from("config.yaml"), exe_dir().join("config.yaml")];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn exe_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays free for MCP JSON-RPC
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("Starting booking-csv");

    let config_path = find_config_path();
    let mut config = load_config(&config_path)?;

    if let Ok(port) = std::env::var("PORT") {
        config.server.port = port
            .parse()
            .with_context(|| format!("PORT must be a port number, got '{port}'"))?;
    }

    let fetcher = BookingClient::new(&config.fetcher).context("failed to build HTTP client")?;
    let extractor = ListingExtractor::new(&config.extraction)?;
    let pipeline = ScrapePipeline::new(Arc::new(fetcher), Arc::new(extractor));

    match config.server.transport {
        Transport::Http => {
            let state = AppState {
                pipeline,
                base_url: config.fetcher.base_url,
            };
            http::serve(&config.server.bind_addr(), state).await?;
        }
        Transport::Stdio => {
            tracing::info!("Serving MCP over stdio");
            let server = BookingMcpServer::new(pipeline, config.fetcher.base_url);
            let service = server.serve(stdio()).await?;
            service.waiting().await?;
        }
    }

    Ok(())
}
