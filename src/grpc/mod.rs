//! gRPC item transfer service.
//!
//! This module provides:
//! - Generated protobuf types and client/server stubs (`proto`)
//! - The `ItemTransfer` implementation over a `NameTable` (`service`)
//! - A serve helper that runs until a shutdown future resolves

pub mod service;

/// Generated proto types for `data_transfer.ItemTransfer`.
pub mod proto {
    tonic::include_proto!("data_transfer");
}

use std::future::Future;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;

pub use service::ItemTransferService;

use proto::item_transfer_server::ItemTransferServer;

/// Serve `ItemTransfer` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(
    service: ItemTransferService,
    listener: TcpListener,
    shutdown: F,
) -> Result<(), tonic::transport::Error>
where
    F: Future<Output = ()>,
{
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(address = %addr, "gRPC server starting");
    }

    tonic::transport::Server::builder()
        .add_service(ItemTransferServer::new(service))
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await?;

    tracing::info!("gRPC server stopped");
    Ok(())
}
