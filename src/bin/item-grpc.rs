//! Item Server (gRPC)
//!
//! Serves `data_transfer.ItemTransfer` (GetItem / SetItem) over an
//! in-memory `id -> name` table.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;

use item_server::grpc::{self, ItemTransferService};
use item_server::lifecycle::{signals, startup};
use item_server::observability::{logging, metrics};
use item_server::NameTable;

#[derive(Parser)]
#[command(name = "item-grpc")]
#[command(about = "In-memory item table over gRPC", long_about = None)]
struct Args {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address (overrides grpc.bind_address)
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = startup::resolve_config(args.config.as_deref(), |config| {
        if let Some(bind) = args.bind {
            config.grpc.bind_address = bind;
        }
    })?;
    startup::check_binds(&config, ("grpc.bind_address", config.grpc.bind_address.as_str()))?;

    logging::init_logging(&config.observability)?;
    tracing::info!("item-grpc v{} starting", env!("CARGO_PKG_VERSION"));

    if config.observability.metrics_enabled {
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr)?;
        }
    }

    let listener = TcpListener::bind(&config.grpc.bind_address).await?;
    let service = ItemTransferService::new(Arc::new(NameTable::new()));

    grpc::serve(service, listener, signals::wait_for_signal()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
