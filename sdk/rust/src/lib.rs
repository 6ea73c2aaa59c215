mod client;
pub use client::{BoxError, Item, ItemClient};
