//! In-memory storage subsystem.
//!
//! # Data Flow
//! ```text
//! Router (REST)            gRPC service
//!     → memory.rs              → table.rs
//!       ResourceStore            NameTable
//!       (String id → Item)       (i32 id → name)
//! ```
//!
//! # Design Decisions
//! - Stores are constructed explicitly and shared via Arc, never global
//! - One mutex per store, held for the whole operation
//! - Nothing is persisted; state lives as long as the process

pub mod item;
pub mod memory;
pub mod table;

pub use item::{Fields, Item};
pub use memory::ResourceStore;
pub use table::NameTable;
