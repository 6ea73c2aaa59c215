//! Item Bridge
//!
//! REST front end for `data_transfer.ItemTransfer`:
//! `GET /items/{id}`, `POST /items/`, `PUT /items/{id}`.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use item_server::bridge::BridgeServer;
use item_server::lifecycle::{signals, startup};
use item_server::observability::{logging, metrics};

#[derive(Parser)]
#[command(name = "item-bridge")]
#[command(about = "REST bridge to the item gRPC service", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides bridge.bind_address)
    #[arg(short, long)]
    bind: Option<String>,

    /// gRPC endpoint URI (overrides bridge.grpc_endpoint)
    #[arg(short, long)]
    grpc: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = startup::resolve_config(args.config.as_deref(), |config| {
        if let Some(bind) = args.bind {
            config.bridge.bind_address = bind;
        }
        if let Some(grpc) = args.grpc {
            config.bridge.grpc_endpoint = grpc;
        }
    })?;
    startup::check_binds(&config, ("bridge.bind_address", config.bridge.bind_address.as_str()))?;

    logging::init_logging(&config.observability)?;
    tracing::info!("item-bridge v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr)?;
        }
    }

    let listener = TcpListener::bind(&config.bridge.bind_address).await?;
    let bridge = BridgeServer::new(config.bridge)?;
    for (method, path) in [("GET", "/items/{id}"), ("POST", "/items/"), ("PUT", "/items/{id}")] {
        tracing::info!(method, path, "Bridge endpoint");
    }

    bridge.run(listener, signals::wait_for_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
