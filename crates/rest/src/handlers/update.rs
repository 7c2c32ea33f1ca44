//! Update interaction handler: `PUT /items/{id}`.
//!
//! The update is conditional. The client must send the version token it last
//! read (the `Etag` of `GET /items/{id}`) as `If-Match`:
//!
//! - no `If-Match` -> `428 Precondition Required`, store untouched
//! - token differs from the stored one -> `412 Precondition Failed`
//! - token matches -> `200 OK` with the updated item and its new `Etag`

use http::StatusCode;
use itemstore_persistence::core::ItemStore;
use tracing::debug;

use super::{HandlerResult, ItemHandlers, RequestContext, decode_item, parse_id};
use crate::error::RestError;
use crate::responses::{ApiResponse, etag_for};

impl<S: ItemStore> ItemHandlers<S> {
    /// Replaces the item with the given id if `if_match` is its current token.
    ///
    /// The id in the path wins over any id in the body.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        raw_id: &str,
        if_match: Option<&str>,
        body: &[u8],
    ) -> HandlerResult {
        let Some(if_match) = if_match.filter(|token| !token.is_empty()) else {
            return Err(ctx.fail(StatusCode::PRECONDITION_REQUIRED, RestError::MissingIfMatch));
        };

        let id = parse_id(raw_id).map_err(|e| ctx.fail(StatusCode::BAD_REQUEST, e))?;
        let mut item = decode_item(body).map_err(|e| ctx.fail(StatusCode::BAD_REQUEST, e))?;
        item.id = id;

        debug!(id = %id, if_match = %if_match, "Processing update request");

        let updated = self
            .store
            .update(item, if_match)
            .await
            .map_err(|e| ctx.fail(StatusCode::INTERNAL_SERVER_ERROR, e))?;

        debug!(id = %updated.id, version = ?updated.version_token(), "Updated item");

        Ok(ApiResponse::json(StatusCode::OK, &updated)
            .map_err(|e| ctx.fail(StatusCode::INTERNAL_SERVER_ERROR, e))?
            .with_etag(etag_for(&updated)))
    }
}
