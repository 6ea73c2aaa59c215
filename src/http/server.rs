//! HTTP server setup and session loop.
//!
//! # Responsibilities
//! - Create the Axum app: one catch-all handler in front of the item router
//! - Wire up middleware (tracing, request ID, server header)
//! - Accept connections and run one HTTP/1.1 session task per connection
//! - Stop accepting on shutdown, close sessions gracefully, abort stragglers
//!
//! # Design Decisions
//! - Routing is done by `routing::Router`, not by Axum's path matcher, so
//!   the raw target reaches the `..` guard untouched
//! - Keep-alive is negotiated per connection by hyper; the handler echoes
//!   the client's preference
//! - No read timeout: a slow client only stalls its own session task

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Method, Request, Response},
    Router,
};
use hyper::server::conn::http1;
use hyper_util::{rt::TokioIo, service::TowerToHyperService};
use tokio::task::JoinSet;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::http::request::{request_target, wants_keep_alive};
use crate::http::response::into_http;
use crate::lifecycle::ShutdownSignal;
use crate::net::{ConnectionTracker, Listener, ListenerError};
use crate::observability::metrics;
use crate::routing::{ApiResponse, Route, RouteError, Router as ItemRouter};
use crate::store::ResourceStore;

/// Value of the `server` response header.
pub const SERVER_NAME: &str = concat!("item-server/", env!("CARGO_PKG_VERSION"));

/// Application state injected into the handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<ItemRouter>,
    pub max_body_size: usize,
}

/// HTTP server for the item store.
pub struct HttpServer {
    app: Router,
    config: ServiceConfig,
    store: Arc<ResourceStore>,
}

impl HttpServer {
    /// Create a new HTTP server with an empty store.
    pub fn new(config: ServiceConfig) -> Self {
        Self::with_store(config, Arc::new(ResourceStore::new()))
    }

    /// Create a new HTTP server over an existing store.
    pub fn with_store(config: ServiceConfig, store: Arc<ResourceStore>) -> Self {
        let state = AppState {
            router: Arc::new(ItemRouter::new(Arc::clone(&store), config.api.clone())),
            max_body_size: config.api.max_body_size,
        };

        let app = Self::build_app(state);
        Self { app, config, store }
    }

    /// Build the Axum app with all middleware layers.
    fn build_app(state: AppState) -> Router {
        Router::new()
            .fallback(dispatch_handler)
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(SetResponseHeaderLayer::if_not_present(
                header::SERVER,
                HeaderValue::from_static(SERVER_NAME),
            ))
    }

    /// The Axum app, for driving requests without a socket.
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// The store backing this server.
    pub fn store(&self) -> Arc<ResourceStore> {
        Arc::clone(&self.store)
    }

    /// Run the session loop until a shutdown signal arrives.
    ///
    /// On shutdown the listener closes at once and every open session is
    /// asked to finish its current request and close. Sessions still open
    /// after `shutdown_grace_secs` are aborted.
    pub async fn run(
        self,
        listener: Listener,
        mut shutdown: ShutdownSignal,
    ) -> Result<(), ListenerError> {
        let addr = listener.local_addr().map_err(ListenerError::Bind)?;
        tracing::info!(
            address = %addr,
            max_connections = listener.max_connections(),
            "HTTP server starting"
        );

        let tracker = ConnectionTracker::new();
        let mut sessions = JoinSet::new();

        loop {
            tokio::select! {
                accepted = listener.accept() => {
                    let (stream, peer_addr, permit) = match accepted {
                        Ok(conn) => conn,
                        Err(ListenerError::Closed) => break,
                        Err(e) => {
                            tracing::warn!(error = %e, "Accept failed");
                            // Back off so a persistent error (e.g. fd exhaustion) does not spin.
                            tokio::time::sleep(Duration::from_millis(50)).await;
                            continue;
                        }
                    };

                    let guard = tracker.track();
                    let service = TowerToHyperService::new(self.app.clone());
                    let mut signal = shutdown.clone();

                    sessions.spawn(async move {
                        let _permit = permit;
                        tracing::debug!(connection_id = %guard.id(), peer_addr = %peer_addr, "Session started");

                        let conn = http1::Builder::new()
                            .keep_alive(true)
                            .serve_connection(TokioIo::new(stream), service);
                        tokio::pin!(conn);

                        let result = tokio::select! {
                            result = conn.as_mut() => result,
                            _ = signal.recv() => {
                                conn.as_mut().graceful_shutdown();
                                conn.await
                            }
                        };
                        if let Err(e) = result {
                            tracing::debug!(connection_id = %guard.id(), error = %e, "Session ended with error");
                        }
                    });
                }
                Some(_) = sessions.join_next() => {}
                _ = shutdown.recv() => {
                    tracing::info!("Shutdown signal received");
                    break;
                }
            }
        }

        drop(listener);
        let grace = Duration::from_secs(self.config.listener.shutdown_grace_secs);
        if tokio::time::timeout(grace, tracker.wait_for_shutdown()).await.is_err() {
            tracing::warn!(
                open_connections = tracker.active_count(),
                "Grace period elapsed, aborting remaining sessions"
            );
        }
        sessions.shutdown().await;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: every request goes through the item router.
async fn dispatch_handler(State(state): State<AppState>, request: Request<Body>) -> Response<Body> {
    let start_time = Instant::now();
    let method = request.method().clone();
    let target = request_target(request.uri()).to_string();
    let keep_alive = wants_keep_alive(request.version(), request.headers());

    let body = match axum::body::to_bytes(request.into_body(), state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(method = %method, target = %target, error = %e, "Failed to read request body");
            let response = ApiResponse::from(RouteError::BadRequest("failed to read body".into()));
            metrics::record_request(method.as_str(), response.status.as_u16(), "none", start_time);
            return into_http(response, keep_alive);
        }
    };

    let (route, result) = state.router.dispatch(&method, &target, &body);
    let response = match result {
        Ok(response) => response,
        Err(e) => {
            tracing::debug!(method = %method, target = %target, error = %e, "Request rejected");
            ApiResponse::from(e)
        }
    };

    let route_label = route.as_ref().map(Route::label).unwrap_or("none");
    metrics::record_request(method.as_str(), response.status.as_u16(), route_label, start_time);
    if mutates_store(&method, route.as_ref()) {
        metrics::record_store_size(state.router.store().len());
    }

    into_http(response, keep_alive)
}

fn mutates_store(method: &Method, route: Option<&Route>) -> bool {
    matches!(
        (method, route),
        (&Method::POST, Some(Route::Collection))
            | (&Method::PUT | &Method::DELETE, Some(Route::Member(_)))
    )
}
