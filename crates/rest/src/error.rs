//! Error types for the item store API.
//!
//! Every failure a handler can produce is a [`RestError`]. Rendering one takes
//! a default status chosen by the handler, which [`status_for`] overrides for
//! the storage errors that have a more precise HTTP meaning:
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | `StorageError::NotFound` | 404 |
//! | `StorageError::Outdated` | 412 |
//! | anything else, including `StorageError::Conflict` | the handler's default |
//!
//! The response body is always `{"error": <message>, "path": <request path>}`.

use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use http::{HeaderValue, StatusCode, header};
use http_body_util::Full;
use itemstore_persistence::StorageError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error};

use crate::responses::into_axum_response;

/// The error type for REST API operations.
#[derive(Debug, Error)]
pub enum RestError {
    /// A failure reported by the item store.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The request body is not valid item JSON.
    #[error("{0}")]
    InvalidBody(String),

    /// The path id is not a UUID.
    #[error("invalid item id '{0}'")]
    InvalidId(String),

    /// An update arrived without an `If-Match` header.
    #[error("If-Match is required header for update")]
    MissingIfMatch,

    /// The authorization policy rejected the request.
    #[error("unauthorized, remove header 'unauthorized'")]
    Unauthorized,

    /// No route matches the method and path.
    #[error("method {method} and/or on url {path} not allowed")]
    NoRoute {
        /// Request method.
        method: String,
        /// Request path.
        path: String,
    },

    /// Failure inside the HTTP layer itself.
    #[error("{0}")]
    Internal(String),
}

/// Result type alias for REST operations.
pub type RestResult<T> = Result<T, RestError>;

/// Maps an error to an HTTP status, falling back to `default`.
///
/// Only `NotFound` and `Outdated` storage errors override the default.
pub fn status_for(err: &RestError, default: StatusCode) -> StatusCode {
    match err {
        RestError::Storage(StorageError::NotFound { .. }) => StatusCode::NOT_FOUND,
        RestError::Storage(StorageError::Outdated { .. }) => StatusCode::PRECONDITION_FAILED,
        _ => default,
    }
}

/// The JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable message.
    pub error: String,
    /// Path (and query) of the request that failed.
    pub path: String,
}

/// A rendered error: status plus body.
#[derive(Debug, Clone)]
pub struct ErrorResponse {
    status: StatusCode,
    body: ErrorBody,
}

impl ErrorResponse {
    /// Renders `err` for the request at `path`, with the status decided by [`status_for`].
    pub fn from_error(default_status: StatusCode, err: &RestError, path: impl Into<String>) -> Self {
        let status = status_for(err, default_status);
        let body = ErrorBody {
            error: err.to_string(),
            path: path.into(),
        };

        if status.is_server_error() {
            error!(status = status.as_u16(), path = %body.path, error = %body.error, "Request failed");
        } else {
            debug!(status = status.as_u16(), path = %body.path, error = %body.error, "Request rejected");
        }

        Self { status, body }
    }

    /// Returns the HTTP status.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the body.
    pub fn body(&self) -> &ErrorBody {
        &self.body
    }

    /// Converts into a plain `http` response.
    pub fn into_http(self) -> http::Response<Full<Bytes>> {
        match serde_json::to_vec(&self.body) {
            Ok(json) => {
                let mut response = http::Response::new(Full::new(Bytes::from(json)));
                *response.status_mut() = self.status;
                response.headers_mut().insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("application/json"),
                );
                response
            }
            Err(_) => {
                let mut response =
                    http::Response::new(Full::new(Bytes::from_static(b"Failed to form the error struct")));
                *response.status_mut() = self.status;
                response
                    .headers_mut()
                    .insert(header::CONTENT_TYPE, HeaderValue::from_static("text/plain"));
                response
            }
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        into_axum_response(self.into_http())
    }
}
