//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for both services.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the item services.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// HTTP listener configuration (bind address, connection limits).
    pub listener: ListenerConfig,

    /// REST surface settings.
    pub api: ApiConfig,

    /// gRPC service settings.
    pub grpc: GrpcConfig,

    /// REST-to-gRPC bridge settings.
    pub bridge: BridgeConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,

    /// Seconds in-flight connections get to finish after shutdown.
    pub shutdown_grace_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            max_connections: 10_000,
            shutdown_grace_secs: 10,
        }
    }
}

/// Route keywords and request limits for the REST surface.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ApiConfig {
    /// First path segment of every API route (`/api`).
    pub root: String,

    /// Collection segment under the root (`/api/items`).
    pub collection: String,

    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            root: "api".to_string(),
            collection: "items".to_string(),
            max_body_size: 1024 * 1024, // 1MB
        }
    }
}

/// gRPC service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GrpcConfig {
    /// Bind address for the `ItemTransfer` service.
    pub bind_address: String,
}

impl Default for GrpcConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8082".to_string(),
        }
    }
}

/// REST-to-gRPC bridge configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Bind address for the bridge's HTTP surface.
    pub bind_address: String,

    /// URI of the `ItemTransfer` service the bridge forwards to.
    pub grpc_endpoint: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8002".to_string(),
            grpc_endpoint: "http://localhost:8082".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, for development.
    #[default]
    Pretty,
    /// One JSON object per event, for log aggregation.
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
