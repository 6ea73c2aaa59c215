//! Response encoding.
//!
//! # Responsibilities
//! - Turn a router ApiResponse into an HTTP response
//! - Mark every body as JSON
//! - Echo the client's keep-alive preference

use axum::{
    body::Body,
    http::{header, HeaderValue, Response},
};

use crate::routing::ApiResponse;

/// Encode an ApiResponse for the wire.
pub fn into_http(response: ApiResponse, keep_alive: bool) -> Response<Body> {
    let body = response.to_bytes();
    let mut http = Response::new(Body::from(body));
    *http.status_mut() = response.status;

    let headers = http.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        header::CONNECTION,
        HeaderValue::from_static(if keep_alive { "keep-alive" } else { "close" }),
    );
    http
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::RouteError;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn sets_json_and_connection_headers() {
        let response = into_http(ApiResponse::from(RouteError::NotFound("/x".into())), false);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(response.headers()[header::CONNECTION], "close");

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"error":"The resource '/x' was not found."}"#);
    }

    #[test]
    fn keep_alive_is_echoed() {
        let response = into_http(ApiResponse::ok(&serde_json::json!([])), true);
        assert_eq!(response.headers()[header::CONNECTION], "keep-alive");
    }
}
