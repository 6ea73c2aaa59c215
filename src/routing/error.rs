//! Request-level failures and their HTTP status mapping.

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that end a single request. None of them affect the connection
/// or other requests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Target is empty, not absolute, or contains `..`.
    #[error("Illegal request-target")]
    InvalidTarget,

    /// Body could not be read or is not a JSON object.
    #[error("Error processing request: {0}")]
    BadRequest(String),

    /// Unknown path or unknown item id. Carries the raw target.
    #[error("The resource '{0}' was not found.")]
    NotFound(String),

    /// Known path, unsupported method.
    #[error("Method not allowed")]
    MethodNotAllowed,
}

impl RouteError {
    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            RouteError::InvalidTarget | RouteError::BadRequest(_) => StatusCode::BAD_REQUEST,
            RouteError::NotFound(_) => StatusCode::NOT_FOUND,
            RouteError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}
