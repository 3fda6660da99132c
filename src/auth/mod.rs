//! Authentication module for the item-list server
//!
//! This module handles credential checks against the seeded user set,
//! token issuance, and bearer-token verification for protected routes.

pub mod handlers;
mod middleware;
mod models;
mod service;

pub use middleware::{bearer_token, Identity};
pub use models::{Claims, User};
pub use service::AuthService;
