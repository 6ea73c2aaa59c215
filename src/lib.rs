//! In-memory item store served over HTTP and gRPC, plus a REST bridge to the gRPC service.

pub mod bridge;
pub mod config;
pub mod grpc;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;
pub mod routing;
pub mod store;

pub use config::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{Item, NameTable, ResourceStore};
