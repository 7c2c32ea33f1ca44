//! Axum routing for the item API.
//!
//! Extractor rejections never reach the client as axum's plain-text bodies:
//! the buffered body is taken as a `Result` and rendered through
//! [`RequestContext::fail`], and the member id is read from the raw path
//! segment so id validation happens in the handlers, as in the minimal router.

use axum::{
    Router,
    body::Bytes,
    extract::{DefaultBodyLimit, OriginalUri, State, rejection::BytesRejection},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use http::{Method, StatusCode, Uri};
use itemstore_persistence::core::ItemStore;

use super::{ITEM_PATH, ITEMS_PATH, ITEMS_SLASH_PATH};
use crate::error::{ErrorResponse, RestError};
use crate::handlers::RequestContext;
use crate::middleware::{ConditionalHeaders, authorize};
use crate::state::AppState;

/// Creates the item routes.
///
/// The authorization middleware wraps the whole router, fallbacks included.
/// HEAD is registered explicitly so it does not fall through to the GET handlers.
pub fn create_routes<S>(state: AppState<S>) -> Router
where
    S: ItemStore + 'static,
{
    let body_limit = state.config().max_body_size;

    Router::new()
        .route(
            ITEMS_PATH,
            get(list_items::<S>).post(create_item::<S>).head(no_route),
        )
        .route(
            ITEMS_SLASH_PATH,
            get(list_items::<S>).post(create_item::<S>).head(no_route),
        )
        .route(
            ITEM_PATH,
            get(get_item::<S>)
                .put(update_item::<S>)
                .delete(delete_item::<S>)
                .head(no_route),
        )
        .fallback(no_route)
        .method_not_allowed_fallback(no_route)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn_with_state(state.clone(), authorize::<S>))
        .with_state(state)
}

/// The raw `{id}` segment of a member path, still percent-encoded.
fn member_id(uri: &Uri) -> &str {
    uri.path().strip_prefix(ITEMS_SLASH_PATH).unwrap_or_default()
}

/// Renders a body extraction failure as a uniform error.
fn body_error(ctx: &RequestContext, limit: usize, rejection: BytesRejection) -> ErrorResponse {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ctx.fail(
            StatusCode::PAYLOAD_TOO_LARGE,
            RestError::InvalidBody(format!("request body exceeds {} bytes", limit)),
        )
    } else {
        ctx.fail(
            StatusCode::BAD_REQUEST,
            RestError::InvalidBody(format!("failed to read request body: {}", rejection.body_text())),
        )
    }
}

async fn list_items<S>(State(state): State<AppState<S>>, OriginalUri(uri): OriginalUri) -> Response
where
    S: ItemStore + 'static,
{
    let ctx = RequestContext::from_uri(&uri);
    state.handlers().list(&ctx).await.into_response()
}

async fn create_item<S>(
    State(state): State<AppState<S>>,
    OriginalUri(uri): OriginalUri,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    S: ItemStore + 'static,
{
    let ctx = RequestContext::from_uri(&uri);
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            return body_error(&ctx, state.config().max_body_size, rejection).into_response();
        }
    };
    state.handlers().create(&ctx, &body).await.into_response()
}

async fn get_item<S>(State(state): State<AppState<S>>, OriginalUri(uri): OriginalUri) -> Response
where
    S: ItemStore + 'static,
{
    let ctx = RequestContext::from_uri(&uri);
    state
        .handlers()
        .get(&ctx, member_id(&uri))
        .await
        .into_response()
}

async fn update_item<S>(
    State(state): State<AppState<S>>,
    OriginalUri(uri): OriginalUri,
    conditional: ConditionalHeaders,
    body: Result<Bytes, BytesRejection>,
) -> Response
where
    S: ItemStore + 'static,
{
    let ctx = RequestContext::from_uri(&uri);
    let id = member_id(&uri);

    // A missing If-Match answers 428 before the body is looked at.
    let Some(if_match) = conditional.if_match() else {
        return state
            .handlers()
            .update(&ctx, id, None, &[])
            .await
            .into_response();
    };

    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            return body_error(&ctx, state.config().max_body_size, rejection).into_response();
        }
    };
    state
        .handlers()
        .update(&ctx, id, Some(if_match), &body)
        .await
        .into_response()
}

async fn delete_item<S>(State(state): State<AppState<S>>, OriginalUri(uri): OriginalUri) -> Response
where
    S: ItemStore + 'static,
{
    let ctx = RequestContext::from_uri(&uri);
    state
        .handlers()
        .delete(&ctx, member_id(&uri))
        .await
        .into_response()
}

async fn no_route(method: Method, OriginalUri(uri): OriginalUri) -> Response {
    let ctx = RequestContext::from_uri(&uri);
    let err = RestError::NoRoute {
        method: method.to_string(),
        path: uri.path().to_string(),
    };
    ctx.fail(StatusCode::METHOD_NOT_ALLOWED, err).into_response()
}
