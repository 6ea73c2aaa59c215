//! Bridge HTTP server.
//!
//! # Responsibilities
//! - Build the `/items` routes over a shared `ItemTransferClient`
//! - Wire up the same middleware as the item server
//! - Serve until the shutdown future resolves

use std::future::Future;

use axum::{
    http::{header, HeaderValue, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tokio::net::TcpListener;
use tonic::transport::{Channel, Endpoint};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::bridge::handlers::{create_item, get_item, update_item};
use crate::config::BridgeConfig;
use crate::grpc::proto::item_transfer_client::ItemTransferClient;

/// Value of the `server` response header.
pub const BRIDGE_NAME: &str = concat!("item-bridge/", env!("CARGO_PKG_VERSION"));

/// State injected into the bridge handlers.
#[derive(Clone)]
pub struct BridgeState {
    pub client: ItemTransferClient<Channel>,
}

/// REST front end for the `ItemTransfer` service.
pub struct BridgeServer {
    app: Router,
    config: BridgeConfig,
}

impl BridgeServer {
    /// Create a bridge with a lazily connected channel to `config.grpc_endpoint`.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn new(config: BridgeConfig) -> Result<Self, tonic::transport::Error> {
        let channel = Endpoint::from_shared(config.grpc_endpoint.clone())?.connect_lazy();
        Ok(Self::with_client(config, ItemTransferClient::new(channel)))
    }

    /// Create a bridge over an existing client.
    pub fn with_client(config: BridgeConfig, client: ItemTransferClient<Channel>) -> Self {
        let app = Self::build_app(BridgeState { client });
        Self { app, config }
    }

    fn build_app(state: BridgeState) -> Router {
        Router::new()
            .route("/items/{id}", get(get_item).put(update_item))
            .route("/items/", post(create_item))
            .route("/items", post(create_item))
            .fallback(|| async { (StatusCode::NOT_FOUND, Json(json!({ "detail": "Not Found" }))) })
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::SERVER,
                HeaderValue::from_static(BRIDGE_NAME),
            ))
    }

    /// The Axum app, for driving requests without a socket.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Serve on an already bound listener until `shutdown` resolves.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            grpc_endpoint = %self.config.grpc_endpoint,
            "Bridge starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("Bridge stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request, response::Response};
    use tower::ServiceExt;

    /// A bridge whose gRPC side refuses connections.
    fn unreachable_bridge() -> BridgeServer {
        BridgeServer::new(BridgeConfig {
            grpc_endpoint: "http://127.0.0.1:1".into(),
            ..BridgeConfig::default()
        })
        .unwrap()
    }

    async fn send(app: Router, method: &str, uri: &str, body: Option<&str>) -> Response {
        let mut request = Request::builder().method(method).uri(uri);
        if body.is_some() {
            request = request.header(header::CONTENT_TYPE, "application/json");
        }
        let request = request
            .body(Body::from(body.unwrap_or_default().to_string()))
            .unwrap();
        app.oneshot(request).await.unwrap()
    }

    async fn json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn id_mismatch_is_rejected_before_any_call() {
        let bridge = unreachable_bridge();
        let response = send(bridge.app(), "PUT", "/items/1", Some(r#"{"id":2,"name":"x"}"#)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            json(response).await,
            json!({ "detail": "Path ID does not match item ID" })
        );
    }

    #[tokio::test]
    async fn unreachable_service_is_bad_gateway() {
        let bridge = unreachable_bridge();
        let response = send(bridge.app(), "GET", "/items/1", None).await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        assert_eq!(response.headers()[header::SERVER], BRIDGE_NAME);
        let detail = json(response).await["detail"].as_str().unwrap().to_string();
        assert!(detail.starts_with("gRPC error"), "{detail}");
    }

    #[tokio::test]
    async fn malformed_items_never_reach_the_service() {
        let bridge = unreachable_bridge();

        let missing_name = send(bridge.app(), "POST", "/items/", Some(r#"{"id":1}"#)).await;
        assert_eq!(missing_name.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let bad_id = send(bridge.app(), "GET", "/items/abc", None).await;
        assert_eq!(bad_id.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_path_is_not_found() {
        let bridge = unreachable_bridge();
        let response = send(bridge.app(), "GET", "/api/items", None).await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json(response).await, json!({ "detail": "Not Found" }));
    }
}
