//! Read interaction handler: `GET /items/{id}`.

use http::StatusCode;
use itemstore_persistence::core::ItemStore;
use tracing::debug;

use super::{HandlerResult, ItemHandlers, RequestContext, parse_id};
use crate::responses::{ApiResponse, etag_for};

impl<S: ItemStore> ItemHandlers<S> {
    /// Returns the item with the given id.
    ///
    /// The `Etag` header carries the item's version token, which a client
    /// sends back as `If-Match` when updating.
    pub async fn get(&self, ctx: &RequestContext, raw_id: &str) -> HandlerResult {
        let id = parse_id(raw_id).map_err(|e| ctx.fail(StatusCode::BAD_REQUEST, e))?;

        let item = self
            .store
            .get_by_id(id)
            .await
            .map_err(|e| ctx.fail(StatusCode::INTERNAL_SERVER_ERROR, e))?;

        debug!(id = %item.id, version = ?item.version_token(), "Read item");

        Ok(ApiResponse::json(StatusCode::OK, &item)
            .map_err(|e| ctx.fail(StatusCode::INTERNAL_SERVER_ERROR, e))?
            .with_etag(etag_for(&item)))
    }
}
