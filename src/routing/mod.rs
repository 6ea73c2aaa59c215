//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (method, target, body)
//!     → target.rs (split path segments & query)
//!     → router.rs (route lookup, method check)
//!     → ResourceStore
//!     → response.rs (status + JSON body) or error.rs (typed failure)
//! ```
//!
//! # Design Decisions
//! - Route table is fixed at construction; keywords come from config
//! - Deterministic: same input always matches same route
//! - No transport types beyond `Method`/`StatusCode`, so the router can be
//!   driven directly from tests

pub mod error;
pub mod response;
pub mod router;
pub mod target;

pub use error::RouteError;
pub use response::ApiResponse;
pub use router::{Route, Router};
pub use target::{parse_target, ParsedTarget};
