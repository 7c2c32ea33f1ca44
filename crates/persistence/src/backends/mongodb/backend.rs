//! MongoDB connection setup.

use std::fmt::Debug;

use mongodb::bson::doc;
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, IndexModel};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{BackendFailure, StorageError, StorageResult};
use crate::types::ItemId;

use super::document::MongoItemDocument;

/// Connection settings for the MongoDB backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MongoConfig {
    /// Connection string.
    #[serde(default = "default_uri")]
    pub uri: String,

    /// Database holding the item collection.
    #[serde(default = "default_database")]
    pub database: String,

    /// Collection name.
    #[serde(default = "default_collection")]
    pub collection: String,
}

fn default_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "itemDB".to_string()
}

fn default_collection() -> String {
    "items".to_string()
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self {
            uri: default_uri(),
            database: default_database(),
            collection: default_collection(),
        }
    }
}

/// MongoDB backend for item storage.
pub struct MongoBackend {
    pub(super) collection: Collection<MongoItemDocument>,
    config: MongoConfig,
}

impl Debug for MongoBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MongoBackend")
            .field("database", &self.config.database)
            .field("collection", &self.config.collection)
            .finish_non_exhaustive()
    }
}

fn connection_error(err: mongodb::error::Error) -> StorageError {
    StorageError::classify(BackendFailure::from(err), ItemId::nil())
}

impl MongoBackend {
    /// Connects, verifies the server answers, and ensures the unique index on `id`.
    pub async fn connect(config: MongoConfig) -> StorageResult<Self> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(connection_error)?;

        let database = client.database(&config.database);
        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(connection_error)?;

        let collection = database.collection::<MongoItemDocument>(&config.collection);
        let index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        collection
            .create_index(index)
            .await
            .map_err(connection_error)?;

        info!(
            database = %config.database,
            collection = %config.collection,
            "Connected to MongoDB item store"
        );

        Ok(Self { collection, config })
    }

    /// Returns the backend configuration.
    pub fn config(&self) -> &MongoConfig {
        &self.config
    }

    /// Removes every item. Intended for test setup.
    pub async fn clear(&self) -> StorageResult<u64> {
        let result = self
            .collection
            .delete_many(doc! {})
            .await
            .map_err(connection_error)?;
        Ok(result.deleted_count)
    }
}
