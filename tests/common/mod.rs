//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use item_server::bridge::BridgeServer;
use item_server::config::{BridgeConfig, ServiceConfig};
use item_server::grpc::{self, ItemTransferService};
use item_server::net::{Listener, ListenerError};
use item_server::{HttpServer, NameTable, ResourceStore, Shutdown};

/// An HTTP server running on an ephemeral port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub store: Arc<ResourceStore>,
    pub shutdown: Shutdown,
    pub handle: JoinHandle<Result<(), ListenerError>>,
}

impl TestServer {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Start the HTTP server with default config and a one second grace period.
pub async fn start_server() -> TestServer {
    let mut config = ServiceConfig::default();
    config.listener.shutdown_grace_secs = 1;
    start_server_with(config).await
}

/// Start the HTTP server with the given config; the bind address is ignored.
pub async fn start_server_with(config: ServiceConfig) -> TestServer {
    let tcp = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = tcp.local_addr().unwrap();
    let listener = Listener::from_tcp(tcp, config.listener.max_connections);

    let server = HttpServer::new(config);
    let store = server.store();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    let handle = tokio::spawn(async move { server.run(listener, server_shutdown).await });

    TestServer {
        addr,
        store,
        shutdown,
        handle,
    }
}

/// A gRPC server running on an ephemeral port.
pub struct TestGrpcServer {
    pub addr: SocketAddr,
    pub table: Arc<NameTable>,
    pub stop: oneshot::Sender<()>,
}

impl TestGrpcServer {
    pub fn endpoint(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Start the gRPC server.
pub async fn start_grpc_server() -> TestGrpcServer {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let table = Arc::new(NameTable::new());
    let service = ItemTransferService::new(Arc::clone(&table));
    let (stop, stopped) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let _ = grpc::serve(service, listener, async move {
            let _ = stopped.await;
        })
        .await;
    });

    TestGrpcServer { addr, table, stop }
}

/// A bridge running on an ephemeral port.
pub struct TestBridge {
    pub addr: SocketAddr,
    pub stop: oneshot::Sender<()>,
}

impl TestBridge {
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

/// Start the bridge in front of the given gRPC endpoint.
pub async fn start_bridge(grpc_endpoint: String) -> TestBridge {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let bridge = BridgeServer::new(BridgeConfig {
        grpc_endpoint,
        ..BridgeConfig::default()
    })
    .unwrap();
    let (stop, stopped) = oneshot::channel::<()>();

    tokio::spawn(async move {
        let _ = bridge
            .run(listener, async move {
                let _ = stopped.await;
            })
            .await;
    });

    TestBridge { addr, stop }
}

/// Write raw bytes to the server and read until it closes the connection.
pub async fn raw_exchange(addr: SocketAddr, request: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    stream.write_all(request.as_bytes()).await.unwrap();

    let mut response = Vec::new();
    tokio::time::timeout(Duration::from_secs(5), stream.read_to_end(&mut response))
        .await
        .expect("server did not close the connection")
        .unwrap();
    String::from_utf8_lossy(&response).into_owned()
}
