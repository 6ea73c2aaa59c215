//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (session task, Axum app, middleware)
//!     → request.rs (raw target, keep-alive preference)
//!     → routing::Router (parse, match, store)
//!     → response.rs (JSON body, connection header)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use server::{AppState, HttpServer, SERVER_NAME};
