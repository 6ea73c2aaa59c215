//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (limits > 0, addresses parse)
//! - Check route keywords are usable as single path segments
//! - Detect listeners of one process sharing a socket
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system
//! - Each binary binds only its own section, so bind conflicts are checked
//!   per process (`check_distinct_binds`), not across sections

use std::net::SocketAddr;

use axum::http::Uri;
use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: '{value}' is not a valid socket address")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("{field}: '{value}' must be a single non-empty path segment")]
    InvalidSegment { field: &'static str, value: String },

    #[error("api.root and api.collection must differ")]
    AmbiguousRoutes,

    #[error("{field}: '{value}' is not an http(s) URI")]
    InvalidEndpoint { field: &'static str, value: String },

    #[error("{first} and {second} both bind {address}")]
    AddressConflict {
        first: &'static str,
        second: &'static str,
        address: String,
    },
}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address("listener.bind_address", &config.listener.bind_address, &mut errors);
    check_address("grpc.bind_address", &config.grpc.bind_address, &mut errors);
    check_address("bridge.bind_address", &config.bridge.bind_address, &mut errors);
    check_endpoint("bridge.grpc_endpoint", &config.bridge.grpc_endpoint, &mut errors);
    if config.observability.metrics_enabled {
        check_address(
            "observability.metrics_address",
            &config.observability.metrics_address,
            &mut errors,
        );
    }

    if config.listener.max_connections == 0 {
        errors.push(ValidationError::Zero("listener.max_connections"));
    }
    if config.api.max_body_size == 0 {
        errors.push(ValidationError::Zero("api.max_body_size"));
    }

    check_segment("api.root", &config.api.root, &mut errors);
    check_segment("api.collection", &config.api.collection, &mut errors);
    if !config.api.root.is_empty() && config.api.root == config.api.collection {
        errors.push(ValidationError::AmbiguousRoutes);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Reject two sockets of the same process that would collide.
///
/// Unparseable addresses are skipped; `validate_config` reports those.
pub fn check_distinct_binds(binds: &[(&'static str, &str)]) -> Result<(), Vec<ValidationError>> {
    let parsed: Vec<(&'static str, SocketAddr)> = binds
        .iter()
        .filter_map(|(field, value)| value.parse().ok().map(|addr| (*field, addr)))
        .collect();

    let mut errors = Vec::new();
    for (i, (first, a)) in parsed.iter().enumerate() {
        for (second, b) in &parsed[i + 1..] {
            if collide(a, b) {
                errors.push(ValidationError::AddressConflict {
                    first: *first,
                    second: *second,
                    address: b.to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Same port, and either the same IP or one side is a wildcard.
fn collide(a: &SocketAddr, b: &SocketAddr) -> bool {
    a.port() == b.port() && (a.ip() == b.ip() || a.ip().is_unspecified() || b.ip().is_unspecified())
}

fn check_endpoint(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    let valid = value.parse::<Uri>().is_ok_and(|uri| {
        matches!(uri.scheme_str(), Some("http" | "https")) && uri.authority().is_some()
    });
    if !valid {
        errors.push(ValidationError::InvalidEndpoint {
            field,
            value: value.to_string(),
        });
    }
}

fn check_address(
    field: &'static str,
    value: &str,
    errors: &mut Vec<ValidationError>,
) -> Option<SocketAddr> {
    match value.parse() {
        Ok(addr) => Some(addr),
        Err(_) => {
            errors.push(ValidationError::InvalidAddress {
                field,
                value: value.to_string(),
            });
            None
        }
    }
}

fn check_segment(field: &'static str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.is_empty() || value.contains('/') || value.contains('?') || value.contains("..") {
        errors.push(ValidationError::InvalidSegment {
            field,
            value: value.to_string(),
        });
    }
}
