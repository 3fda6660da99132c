//! Item store module
//!
//! The shared in-memory item collection and the HTTP handlers in front of it.

pub mod handlers;
pub mod models;
pub mod store;

pub use models::{Item, ItemRequest};
pub use store::ItemStore;
