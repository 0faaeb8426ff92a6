//! Credential-injecting relay for the 1inch developer API.
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                   RELAY                      │
//!                    │                                              │
//!   Client Request   │  ┌────────┐   ┌────────┐   ┌─────────────┐  │
//!   ─────────────────┼─▶│  http  │──▶│ relay  │──▶│   relay     │  │
//!                    │  │ server │   │ target │   │   policy    │  │
//!                    │  └────────┘   └────────┘   └──────┬──────┘  │
//!                    │                                   │         │
//!                    │                                   ▼         │
//!   Client Response  │  ┌────────┐                ┌─────────────┐  │      1inch
//!   ◀────────────────┼──│ result │◀───────────────│  forwarder  │◀─┼───── API
//!                    │  │mapping │                │ (+ headers) │  │
//!                    │  └────────┘                └─────────────┘  │
//!                    │                                              │
//!                    │  Cross-cutting: config, request IDs, tracing │
//!                    └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use oneinch_relay::config::load_config;
use oneinch_relay::http::HttpServer;

#[derive(Parser)]
#[command(name = "oneinch-relay")]
#[command(about = "Credential-injecting relay for the 1inch developer API", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "oneinch_relay=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("oneinch-relay v0.1.0 starting");

    let config = load_config(cli.config.as_deref())?;

    if config.auth.token.as_deref().map_or(true, str::is_empty) {
        tracing::warn!(
            "AUTHORIZATION is not set; proxy requests will be rejected until a credential is configured"
        );
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        environment = %config.environment,
        "Configuration loaded"
    );

    // Bind TCP listener
    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    // Create and run HTTP server
    let server = HttpServer::new(config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
