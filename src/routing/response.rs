//! Structured router output.

use axum::http::StatusCode;
use serde::Serialize;
use serde_json::{json, Value};

use crate::routing::error::RouteError;

/// Status plus JSON body, independent of any transport.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl ApiResponse {
    /// Build a response from any serializable payload.
    ///
    /// Serialization failures degrade to a 400 with a generic message.
    pub fn with_status<T: Serialize>(status: StatusCode, payload: &T) -> Self {
        match serde_json::to_value(payload) {
            Ok(body) => Self { status, body },
            Err(e) => {
                tracing::error!(error = %e, "Failed to serialize response");
                Self::error(&RouteError::BadRequest("response could not be encoded".into()))
            }
        }
    }

    /// 200 OK.
    pub fn ok<T: Serialize>(payload: &T) -> Self {
        Self::with_status(StatusCode::OK, payload)
    }

    /// 201 Created.
    pub fn created<T: Serialize>(payload: &T) -> Self {
        Self::with_status(StatusCode::CREATED, payload)
    }

    /// `{"error": "<message>"}` with the error's status.
    pub fn error(error: &RouteError) -> Self {
        Self {
            status: error.status(),
            body: json!({ "error": error.to_string() }),
        }
    }

    /// Encoded body bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        // Value -> bytes only fails for non-string map keys, which Value cannot hold.
        serde_json::to_vec(&self.body).unwrap_or_else(|_| b"{}".to_vec())
    }
}

impl From<RouteError> for ApiResponse {
    fn from(error: RouteError) -> Self {
        Self::error(&error)
    }
}
