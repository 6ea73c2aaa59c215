//! Bridge error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Failures the bridge reports to its HTTP callers.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// GetItem answered NOT_FOUND.
    #[error("Item not found")]
    NotFound,

    /// PUT path id and body id differ.
    #[error("Path ID does not match item ID")]
    IdMismatch,

    /// Any other gRPC failure, including an unreachable service.
    #[error("gRPC error: {}", .0.message())]
    Upstream(tonic::Status),
}

impl BridgeError {
    pub fn status(&self) -> StatusCode {
        match self {
            BridgeError::NotFound => StatusCode::NOT_FOUND,
            BridgeError::IdMismatch => StatusCode::BAD_REQUEST,
            BridgeError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for BridgeError {
    fn into_response(self) -> Response {
        if let BridgeError::Upstream(status) = &self {
            tracing::warn!(code = ?status.code(), message = %status.message(), "gRPC call failed");
        }
        (self.status(), Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
