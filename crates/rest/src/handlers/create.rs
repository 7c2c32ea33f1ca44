//! Create interaction handler: `POST /items`.

use http::StatusCode;
use itemstore_persistence::core::ItemStore;
use tracing::debug;

use super::{HandlerResult, ItemHandlers, RequestContext, decode_item};
use crate::responses::ApiResponse;

impl<S: ItemStore> ItemHandlers<S> {
    /// Saves the item in `body` and returns it with `201 Created`.
    ///
    /// # Response
    ///
    /// - `201 Created` - the saved item, with its id and timestamps
    /// - `400 Bad Request` - body is not item JSON
    /// - `500 Internal Server Error` - any store failure, including a duplicate id
    pub async fn create(&self, ctx: &RequestContext, body: &[u8]) -> HandlerResult {
        let item = decode_item(body).map_err(|e| ctx.fail(StatusCode::BAD_REQUEST, e))?;

        let saved = self
            .store
            .save(item)
            .await
            .map_err(|e| ctx.fail(StatusCode::INTERNAL_SERVER_ERROR, e))?;

        debug!(id = %saved.id, "Created item");

        ApiResponse::json(StatusCode::CREATED, &saved)
            .map_err(|e| ctx.fail(StatusCode::INTERNAL_SERVER_ERROR, e))
    }
}
