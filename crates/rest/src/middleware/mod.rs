//! HTTP middleware for the item API.
//!
//! - [`conditional`] - Conditional request headers (If-Match)
//! - [`auth`] - Authorization gate applied in front of every route

pub mod auth;
pub mod conditional;

pub use auth::authorize;
pub use conditional::ConditionalHeaders;
