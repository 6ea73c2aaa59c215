//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Resolve parsed segments against the fixed route table
//! - Check the method only once a path has matched
//! - Call the resource store and shape its result into an ApiResponse
//!
//! # Design Decisions
//! - Unknown path is always 404, whatever the method
//! - Known path with an unsupported method is 405
//! - Bodies are parsed before the store is touched, so a bad body never
//!   mutates anything
//! - The info route answers every method

use std::sync::Arc;

use axum::http::Method;
use serde_json::{json, Value};

use crate::config::ApiConfig;
use crate::routing::error::RouteError;
use crate::routing::response::ApiResponse;
use crate::routing::target::{parse_target, ParsedTarget};
use crate::store::{Fields, ResourceStore};

/// A matched route. Computed per request, never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `/` or `/{root}`
    Info,
    /// `/{root}/{collection}`
    Collection,
    /// `/{root}/{collection}/{id}`
    Member(String),
}

impl Route {
    /// Low-cardinality label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            Route::Info => "info",
            Route::Collection => "collection",
            Route::Member(_) => "member",
        }
    }
}

/// Dispatches requests to the resource store.
#[derive(Debug, Clone)]
pub struct Router {
    store: Arc<ResourceStore>,
    api: ApiConfig,
}

impl Router {
    /// Create a router over a shared store.
    pub fn new(store: Arc<ResourceStore>, api: ApiConfig) -> Self {
        Self { store, api }
    }

    /// The store this router dispatches to.
    pub fn store(&self) -> &Arc<ResourceStore> {
        &self.store
    }

    /// Match path segments against the route table.
    pub fn resolve(&self, target: &ParsedTarget) -> Option<Route> {
        let root = self.api.root.as_str();
        let collection = self.api.collection.as_str();

        match target.segments().as_slice() {
            [] => Some(Route::Info),
            [r] if *r == root => Some(Route::Info),
            [r, c] if *r == root && *c == collection => Some(Route::Collection),
            [r, c, id] if *r == root && *c == collection => Some(Route::Member(id.to_string())),
            _ => None,
        }
    }

    /// Route a request, returning the matched route alongside the outcome.
    ///
    /// The route is `None` when the target was illegal or matched nothing.
    pub fn dispatch(
        &self,
        method: &Method,
        target: &str,
        body: &[u8],
    ) -> (Option<Route>, Result<ApiResponse, RouteError>) {
        let parsed = match parse_target(target) {
            Ok(parsed) => parsed,
            Err(e) => return (None, Err(e)),
        };

        match self.resolve(&parsed) {
            Some(route) => {
                let result = self.invoke(&route, method, target, body);
                (Some(route), result)
            }
            None => (None, Err(RouteError::NotFound(target.to_string()))),
        }
    }

    fn invoke(
        &self,
        route: &Route,
        method: &Method,
        target: &str,
        body: &[u8],
    ) -> Result<ApiResponse, RouteError> {
        let not_found = || RouteError::NotFound(target.to_string());

        match route {
            Route::Info => Ok(ApiResponse::ok(&self.info())),
            Route::Collection => match *method {
                Method::GET => Ok(ApiResponse::ok(&self.store.list())),
                Method::POST => {
                    let fields = parse_fields(body)?;
                    Ok(ApiResponse::created(&self.store.create(fields)))
                }
                _ => Err(RouteError::MethodNotAllowed),
            },
            Route::Member(id) => match *method {
                Method::GET => self
                    .store
                    .get(id)
                    .map(|item| ApiResponse::ok(&item))
                    .ok_or_else(not_found),
                Method::PUT => {
                    let fields = parse_fields(body)?;
                    self.store
                        .update(id, fields)
                        .map(|item| ApiResponse::ok(&item))
                        .ok_or_else(not_found)
                }
                Method::DELETE => {
                    if self.store.delete(id) {
                        Ok(ApiResponse::ok(&json!({
                            "success": true,
                            "message": "Item deleted",
                        })))
                    } else {
                        Err(not_found())
                    }
                }
                _ => Err(RouteError::MethodNotAllowed),
            },
        }
    }

    /// Static capability payload served on the info route.
    fn info(&self) -> Value {
        let base = format!("/{}/{}", self.api.root, self.api.collection);
        json!({
            "name": "Item Server REST API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": [
                format!("{base} - GET (list all), POST (create new)"),
                format!("{base}/{{id}} - GET (retrieve), PUT (update), DELETE (remove)"),
            ],
        })
    }
}

/// Decode a request body that must be a JSON object.
fn parse_fields(body: &[u8]) -> Result<Fields, RouteError> {
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => Ok(fields),
        Ok(_) => Err(RouteError::BadRequest("request body must be a JSON object".into())),
        Err(e) => Err(RouteError::BadRequest(e.to_string())),
    }
}
