//! Response building for the item API.
//!
//! - [`headers`] - Etag generation for item responses
//!
//! Handlers produce an [`ApiResponse`], which both routers turn into a
//! concrete HTTP response.

pub mod headers;

use axum::body::Body;
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use http::{HeaderMap, HeaderValue, StatusCode, header};
use http_body_util::Full;
use serde::Serialize;

use crate::error::{RestError, RestResult};

pub use headers::etag_for;

/// A successful handler result: status, extra headers and an optional JSON body.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Option<Bytes>,
}

impl ApiResponse {
    /// Serializes `value` as the JSON body of a response with `status`.
    pub fn json<T: Serialize>(status: StatusCode, value: &T) -> RestResult<Self> {
        let body = serde_json::to_vec(value)
            .map_err(|e| RestError::Internal(format!("failed to encode response: {}", e)))?;
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        Ok(Self {
            status,
            headers,
            body: Some(Bytes::from(body)),
        })
    }

    /// A `204 No Content` response.
    pub fn no_content() -> Self {
        Self {
            status: StatusCode::NO_CONTENT,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Adds an `Etag` header when a value is present.
    pub fn with_etag(mut self, etag: Option<HeaderValue>) -> Self {
        if let Some(value) = etag {
            self.headers.insert(header::ETAG, value);
        }
        self
    }

    /// Returns the status code.
    pub fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the response headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Returns the body bytes, if any.
    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    /// Converts into a plain `http` response.
    pub fn into_http(self) -> http::Response<Full<Bytes>> {
        let mut response = http::Response::new(Full::new(self.body.unwrap_or_default()));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        into_axum_response(self.into_http())
    }
}

/// Converts a buffered `http` response into an axum response.
pub fn into_axum_response(response: http::Response<Full<Bytes>>) -> Response {
    response.map(Body::new)
}
