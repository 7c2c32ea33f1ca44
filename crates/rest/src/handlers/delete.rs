//! Delete interaction handler: `DELETE /items/{id}`.

use http::StatusCode;
use itemstore_persistence::core::ItemStore;
use tracing::debug;

use super::{HandlerResult, ItemHandlers, RequestContext, parse_id};
use crate::responses::ApiResponse;

impl<S: ItemStore> ItemHandlers<S> {
    /// Deletes the item with the given id, answering `204 No Content`.
    pub async fn delete(&self, ctx: &RequestContext, raw_id: &str) -> HandlerResult {
        let id = parse_id(raw_id).map_err(|e| ctx.fail(StatusCode::BAD_REQUEST, e))?;

        self.store
            .delete_by_id(id)
            .await
            .map_err(|e| ctx.fail(StatusCode::INTERNAL_SERVER_ERROR, e))?;

        debug!(id = %id, "Deleted item");
        Ok(ApiResponse::no_content())
    }
}
