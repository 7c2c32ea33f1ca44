//! Authorization policy applied in front of every route.
//!
//! The service ships with a stub gate: a request carrying a header named
//! `unauthorized` is refused. The gate is an injected [`AuthorizationPolicy`],
//! so a real scheme can replace it without touching the handlers.

use std::fmt;
use std::sync::Arc;

use http::{HeaderMap, Uri, header};
use tracing::debug;

/// Name of the header whose presence denies access under the default policy.
pub const UNAUTHORIZED_HEADER: &str = "unauthorized";

/// Decides whether a request may proceed.
pub trait AuthorizationPolicy: Send + Sync + 'static {
    /// Returns `true` when the request is allowed.
    fn is_authorized(&self, headers: &HeaderMap, host: Option<&str>) -> bool;
}

/// A policy shared by every request.
pub type SharedPolicy = Arc<dyn AuthorizationPolicy>;

/// Denies any request that carries the `unauthorized` header.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnauthorizedHeaderPolicy;

impl AuthorizationPolicy for UnauthorizedHeaderPolicy {
    fn is_authorized(&self, headers: &HeaderMap, host: Option<&str>) -> bool {
        let authorized = !headers.contains_key(UNAUTHORIZED_HEADER);
        debug!(host = host.unwrap_or("-"), authorized, "Authorization check");
        authorized
    }
}

/// Allows every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl AuthorizationPolicy for AllowAll {
    fn is_authorized(&self, _headers: &HeaderMap, _host: Option<&str>) -> bool {
        true
    }
}

/// Adapts a closure into an [`AuthorizationPolicy`].
///
/// ```
/// use itemstore_rest::auth::{AuthorizationPolicy, PolicyFn};
/// use http::HeaderMap;
///
/// let policy = PolicyFn::new(|headers: &HeaderMap, _host: Option<&str>| {
///     headers.contains_key("x-api-key")
/// });
/// assert!(!policy.is_authorized(&HeaderMap::new(), None));
/// ```
pub struct PolicyFn<F>(F);

impl<F> PolicyFn<F>
where
    F: Fn(&HeaderMap, Option<&str>) -> bool + Send + Sync + 'static,
{
    /// Wraps `f`.
    pub fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> AuthorizationPolicy for PolicyFn<F>
where
    F: Fn(&HeaderMap, Option<&str>) -> bool + Send + Sync + 'static,
{
    fn is_authorized(&self, headers: &HeaderMap, host: Option<&str>) -> bool {
        (self.0)(headers, host)
    }
}

impl<F> fmt::Debug for PolicyFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PolicyFn")
    }
}

/// Host the request was addressed to: the `Host` header, else the URI authority.
pub fn request_host<'a>(headers: &'a HeaderMap, uri: &'a Uri) -> Option<&'a str> {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .or_else(|| uri.host())
}
