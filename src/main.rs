//! Item Server (HTTP)
//!
//! An in-memory item store behind a small REST surface.
//!
//! # Architecture Overview
//!
//! ```text
//!                     ┌──────────────────────────────────────────────────────┐
//!                     │                     ITEM SERVER                      │
//!                     │                                                      │
//!   Client Request    │  ┌──────────┐   ┌─────────┐   ┌─────────┐            │
//!   ──────────────────┼─▶│   net    │──▶│  http   │──▶│ routing │            │
//!                     │  │ listener │   │ session │   │ target  │            │
//!                     │  └──────────┘   └─────────┘   │ router  │            │
//!                     │                               └────┬────┘            │
//!                     │                                    ▼                 │
//!   Client Response   │                  ┌─────────┐  ┌──────────────┐       │
//!   ◀─────────────────┼──────────────────│response │◀─│ResourceStore │       │
//!                     │                  └─────────┘  └──────────────┘       │
//!                     │                                                      │
//!                     │  config · observability · lifecycle                  │
//!                     └──────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `item-server [ADDRESS] [PORT] [--config FILE]`

use std::net::IpAddr;
use std::path::PathBuf;

use clap::Parser;

use item_server::config::ServiceConfig;
use item_server::lifecycle::{signals, startup, Shutdown};
use item_server::net::Listener;
use item_server::observability::{logging, metrics};
use item_server::HttpServer;

#[derive(Parser)]
#[command(name = "item-server")]
#[command(about = "In-memory item store over HTTP", long_about = None)]
struct Args {
    /// Address to bind (overrides listener.bind_address)
    address: Option<IpAddr>,

    /// Port to bind (overrides listener.bind_address)
    port: Option<u16>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn apply_bind_override(config: &mut ServiceConfig, address: Option<IpAddr>, port: Option<u16>) {
    if address.is_none() && port.is_none() {
        return;
    }
    let current: Option<std::net::SocketAddr> = config.listener.bind_address.parse().ok();
    let ip = address
        .or_else(|| current.map(|a| a.ip()))
        .unwrap_or(IpAddr::from([0, 0, 0, 0]));
    let port = port.or_else(|| current.map(|a| a.port())).unwrap_or(8080);
    config.listener.bind_address = std::net::SocketAddr::new(ip, port).to_string();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = startup::resolve_config(args.config.as_deref(), |config| {
        apply_bind_override(config, args.address, args.port)
    })?;
    startup::check_binds(&config, ("listener.bind_address", config.listener.bind_address.as_str()))?;

    logging::init_logging(&config.observability)?;
    tracing::info!("item-server v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        max_connections = config.listener.max_connections,
        api_root = %config.api.root,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr)?,
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = Listener::bind(&config.listener).await?;
    startup::log_endpoints(&config.api);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        shutdown.trigger();
    });

    let server = HttpServer::new(config);
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
