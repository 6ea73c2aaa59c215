//! Request inspection.
//!
//! # Responsibilities
//! - Recover the raw request target (path + query) for the router
//! - Decide whether the client wants the connection kept open
//!
//! # Design Decisions
//! - The target is taken verbatim from the request line, never normalized,
//!   so the router's `..` guard sees exactly what the client sent
//! - HTTP/1.1 defaults to keep-alive, HTTP/1.0 to close

use axum::http::{header, HeaderMap, Uri, Version};

/// The `path[?query]` part of the request URI.
///
/// Empty when the URI carries no path (authority-form).
pub fn request_target(uri: &Uri) -> &str {
    uri.path_and_query().map(|pq| pq.as_str()).unwrap_or("")
}

/// True when the connection should stay open after this request.
pub fn wants_keep_alive(version: Version, headers: &HeaderMap) -> bool {
    let has_token = |token: &str| {
        headers
            .get_all(header::CONNECTION)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(','))
            .any(|t| t.trim().eq_ignore_ascii_case(token))
    };

    match version {
        Version::HTTP_09 | Version::HTTP_10 => has_token("keep-alive"),
        _ => !has_token("close"),
    }
}
