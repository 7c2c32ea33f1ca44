//! Axum middleware enforcing the authorization policy.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use itemstore_persistence::core::ItemStore;

use crate::auth::request_host;
use crate::error::{ErrorResponse, RestError};
use crate::handlers::RequestContext;
use crate::state::AppState;

/// Rejects requests the configured policy refuses with 401.
///
/// Installed as a layer over the whole router, so unmatched routes are
/// refused too.
pub async fn authorize<S>(State(state): State<AppState<S>>, request: Request, next: Next) -> Response
where
    S: ItemStore + 'static,
{
    let host = request_host(request.headers(), request.uri());
    if state.policy().is_authorized(request.headers(), host) {
        return next.run(request).await;
    }

    let ctx = RequestContext::from_uri(request.uri());
    ErrorResponse::from_error(StatusCode::UNAUTHORIZED, &RestError::Unauthorized, ctx.path())
        .into_response()
}
