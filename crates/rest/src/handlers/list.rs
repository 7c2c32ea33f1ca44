//! List interaction handler: `GET /items`.

use http::StatusCode;
use itemstore_persistence::core::ItemStore;
use tracing::debug;

use super::{HandlerResult, ItemHandlers, RequestContext};
use crate::responses::ApiResponse;

impl<S: ItemStore> ItemHandlers<S> {
    /// Returns every stored item as a JSON array.
    ///
    /// An empty store yields `[]`.
    pub async fn list(&self, ctx: &RequestContext) -> HandlerResult {
        let items = self
            .store
            .get_all()
            .await
            .map_err(|e| ctx.fail(StatusCode::INTERNAL_SERVER_ERROR, e))?;

        debug!(count = items.len(), "Listed items");

        ApiResponse::json(StatusCode::OK, &items)
            .map_err(|e| ctx.fail(StatusCode::INTERNAL_SERVER_ERROR, e))
    }
}
