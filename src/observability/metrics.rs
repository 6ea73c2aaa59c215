//! Metrics collection and exposition.
//!
//! # Metrics
//! - `item_requests_total` (counter): HTTP requests by method, status, route
//! - `item_request_duration_seconds` (histogram): latency by route
//! - `item_store_size` (gauge): items currently stored
//! - `item_active_connections` (gauge): open HTTP connections
//! - `item_grpc_calls_total` (counter): gRPC calls by rpc and outcome

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed HTTP request.
pub fn record_request(method: &str, status: u16, route: &'static str, start: Instant) {
    counter!(
        "item_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string(),
        "route" => route
    )
    .increment(1);
    histogram!("item_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record the current number of stored items.
pub fn record_store_size(size: usize) {
    gauge!("item_store_size").set(size as f64);
}

/// Record the current number of open connections.
pub fn record_active_connections(count: u64) {
    gauge!("item_active_connections").set(count as f64);
}

/// Record a gRPC call outcome.
pub fn record_grpc_call(rpc: &'static str, outcome: &'static str) {
    counter!("item_grpc_calls_total", "rpc" => rpc, "outcome" => outcome).increment(1);
}
