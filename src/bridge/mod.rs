//! REST-to-gRPC bridge.
//!
//! # Data Flow
//! ```text
//! HTTP request (/items/...)
//!     → handlers.rs (JSON body, path/body id check)
//!     → ItemTransferClient (GetItem / SetItem)
//!     → JSON item, or error.rs (status + {"detail": ...})
//! ```
//!
//! # Design Decisions
//! - Holds no state of its own; the gRPC service owns the table
//! - The gRPC channel connects lazily, so the bridge starts while the
//!   service is still down and reports 502 until it is up

pub mod error;
pub mod handlers;
pub mod server;

pub use error::BridgeError;
pub use handlers::BridgeItem;
pub use server::{BridgeServer, BridgeState};
