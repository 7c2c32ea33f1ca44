//! ItemStore implementation for SQLite.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::params;
use tracing::debug;

use crate::core::ItemStore;
use crate::error::{BackendFailure, StorageError, StorageResult};
use crate::types::timestamp::{now_millis, render_token};
use crate::types::{Item, ItemDocument, ItemId, StorageKey};

use super::SqliteBackend;

fn internal_error(message: String) -> StorageError {
    StorageError::unclassified(message)
}

fn classify(err: rusqlite::Error, id: ItemId) -> StorageError {
    StorageError::classify(BackendFailure::from(err), id)
}

fn token_column(ts: Option<DateTime<Utc>>) -> String {
    ts.as_ref().map(render_token).unwrap_or_default()
}

fn decode_row(storage_key: i64, data: &[u8]) -> StorageResult<Item> {
    let document: ItemDocument = serde_json::from_slice(data)
        .map_err(|e| internal_error(format!("Failed to deserialize item: {}", e)))?;
    Ok(document.into_item(StorageKey::new(storage_key.to_string())))
}

#[async_trait]
impl ItemStore for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn save(&self, mut item: Item) -> StorageResult<Item> {
        let conn = self.get_connection()?;
        item.stamp_for_save(now_millis());

        let data = serde_json::to_vec(&ItemDocument::from(&item))
            .map_err(|e| internal_error(format!("Failed to serialize item: {}", e)))?;

        conn.execute(
            "INSERT INTO items (id, data, created_on, updated_on) VALUES (?1, ?2, ?3, ?4)",
            params![
                item.id.to_string(),
                data,
                token_column(item.created_on),
                token_column(item.updated_on)
            ],
        )
        .map_err(|e| classify(e, item.id))?;

        item.storage_key = Some(StorageKey::new(conn.last_insert_rowid().to_string()));

        debug!(id = %item.id, "Item saved");
        Ok(item)
    }

    async fn get_by_id(&self, id: ItemId) -> StorageResult<Item> {
        let conn = self.get_connection()?;

        let (storage_key, data): (i64, Vec<u8>) = conn
            .query_row(
                "SELECT storage_key, data FROM items WHERE id = ?1",
                params![id.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .map_err(|e| classify(e, id))?;

        decode_row(storage_key, &data)
    }

    async fn get_all(&self) -> StorageResult<Vec<Item>> {
        let conn = self.get_connection()?;

        let mut stmt = conn
            .prepare("SELECT storage_key, data FROM items ORDER BY created_on, id")
            .map_err(|e| internal_error(format!("Failed to prepare query: {}", e)))?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, i64>(0)?, row.get::<_, Vec<u8>>(1)?))
            })
            .map_err(|e| internal_error(format!("Failed to query items: {}", e)))?;

        let mut items = Vec::new();
        for row in rows {
            let (storage_key, data) =
                row.map_err(|e| internal_error(format!("Failed to read row: {}", e)))?;
            items.push(decode_row(storage_key, &data)?);
        }

        Ok(items)
    }

    async fn delete_by_id(&self, id: ItemId) -> StorageResult<()> {
        let conn = self.get_connection()?;

        let affected = conn
            .execute("DELETE FROM items WHERE id = ?1", params![id.to_string()])
            .map_err(|e| classify(e, id))?;

        if affected == 0 {
            return Err(StorageError::classify(
                BackendFailure::NoMatchingDocument,
                id,
            ));
        }

        debug!(id = %id, "Item deleted");
        Ok(())
    }

    async fn replace_versioned(
        &self,
        replacement: &Item,
        previous: DateTime<Utc>,
    ) -> StorageResult<u64> {
        let storage_key: i64 = replacement
            .storage_key
            .as_ref()
            .and_then(|key| key.as_str().parse().ok())
            .ok_or_else(|| {
                internal_error(format!("item {} has no sqlite storage key", replacement.id))
            })?;

        let conn = self.get_connection()?;
        let data = serde_json::to_vec(&ItemDocument::from(replacement))
            .map_err(|e| internal_error(format!("Failed to serialize item: {}", e)))?;

        let affected = conn
            .execute(
                "UPDATE items SET data = ?1, updated_on = ?2
                 WHERE storage_key = ?3 AND updated_on = ?4",
                params![
                    data,
                    token_column(replacement.updated_on),
                    storage_key,
                    render_token(&previous)
                ],
            )
            .map_err(|e| classify(e, replacement.id))?;

        Ok(affected as u64)
    }
}
