//! Request handlers for the item API.
//!
//! The handlers are router-agnostic: they take already-extracted inputs
//! (request path, raw id segment, body bytes, `If-Match`) and return an
//! [`ApiResponse`] or an [`ErrorResponse`]. Both routers in
//! [`crate::routing`] call the same [`ItemHandlers`], so they behave
//! identically.
//!
//! - [`list`] - `GET /items`
//! - [`create`] - `POST /items`
//! - [`read`] - `GET /items/{id}`
//! - [`update`] - `PUT /items/{id}` (conditional on `If-Match`)
//! - [`delete`] - `DELETE /items/{id}`

pub mod create;
pub mod delete;
pub mod list;
pub mod read;
pub mod update;

use std::sync::Arc;

use http::{StatusCode, Uri};
use itemstore_persistence::types::{Item, ItemId};

use crate::error::{ErrorResponse, RestError};
use crate::responses::ApiResponse;

/// Outcome of a handler.
pub type HandlerResult = Result<ApiResponse, ErrorResponse>;

/// Per-request information the handlers need besides their inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    path: String,
}

impl RequestContext {
    /// Creates a context for the request at `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a context from the request URI, keeping the query string.
    pub fn from_uri(uri: &Uri) -> Self {
        let path = uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| uri.path());
        Self::new(path)
    }

    /// Returns the request path (and query).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Renders `err` for this request.
    pub(crate) fn fail(&self, default_status: StatusCode, err: impl Into<RestError>) -> ErrorResponse {
        ErrorResponse::from_error(default_status, &err.into(), self.path.as_str())
    }
}

/// The five item operations over a shared store.
pub struct ItemHandlers<S> {
    store: Arc<S>,
}

impl<S> Clone for ItemHandlers<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S> ItemHandlers<S> {
    /// Creates handlers over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Returns the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// Parses a path segment as an item id.
fn parse_id(raw: &str) -> Result<ItemId, RestError> {
    raw.parse::<ItemId>()
        .map_err(|_| RestError::InvalidId(raw.to_string()))
}

/// Decodes a request body as item JSON.
fn decode_item(body: &[u8]) -> Result<Item, RestError> {
    serde_json::from_slice(body).map_err(|e| RestError::InvalidBody(format!("invalid item body: {}", e)))
}
