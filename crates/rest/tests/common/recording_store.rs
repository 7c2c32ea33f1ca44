//! An item store double that records calls and can fail on demand.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use itemstore_persistence::backends::memory::MemoryBackend;
use itemstore_persistence::core::ItemStore;
use itemstore_persistence::types::{Item, ItemId};
use itemstore_persistence::{StorageError, StorageResult};

/// The error every operation returns when the store is set to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CannedError {
    NotFound,
    Outdated,
    Conflict,
    Unclassified,
}

impl CannedError {
    fn to_error(self, id: ItemId) -> StorageError {
        match self {
            CannedError::NotFound => StorageError::NotFound { id },
            CannedError::Outdated => StorageError::Outdated {
                id,
                expected: "expected".to_string(),
                actual: "actual".to_string(),
            },
            CannedError::Conflict => StorageError::Conflict { id },
            CannedError::Unclassified => StorageError::unclassified("canned failure"),
        }
    }
}

/// Per-operation call counters.
#[derive(Debug, Default)]
pub struct CallCounts {
    pub save: AtomicUsize,
    pub get_by_id: AtomicUsize,
    pub get_all: AtomicUsize,
    pub delete_by_id: AtomicUsize,
    pub update: AtomicUsize,
    pub replace_versioned: AtomicUsize,
}

impl CallCounts {
    /// Sum of every counter.
    pub fn total(&self) -> usize {
        [
            &self.save,
            &self.get_by_id,
            &self.get_all,
            &self.delete_by_id,
            &self.update,
            &self.replace_versioned,
        ]
        .iter()
        .map(|c| c.load(Ordering::SeqCst))
        .sum()
    }
}

/// Delegates to an in-memory store, counting calls; returns `canned` instead when set.
#[derive(Debug, Default)]
pub struct RecordingStore {
    inner: MemoryBackend,
    canned: Option<CannedError>,
    pub calls: CallCounts,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store whose every operation fails with `error`.
    pub fn failing(error: CannedError) -> Self {
        Self {
            canned: Some(error),
            ..Self::default()
        }
    }

    fn check(&self, counter: &AtomicUsize, id: ItemId) -> StorageResult<()> {
        counter.fetch_add(1, Ordering::SeqCst);
        match self.canned {
            Some(canned) => Err(canned.to_error(id)),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl ItemStore for RecordingStore {
    fn backend_name(&self) -> &'static str {
        "recording"
    }

    async fn save(&self, item: Item) -> StorageResult<Item> {
        self.check(&self.calls.save, item.id)?;
        self.inner.save(item).await
    }

    async fn get_by_id(&self, id: ItemId) -> StorageResult<Item> {
        self.check(&self.calls.get_by_id, id)?;
        self.inner.get_by_id(id).await
    }

    async fn get_all(&self) -> StorageResult<Vec<Item>> {
        self.check(&self.calls.get_all, ItemId::nil())?;
        self.inner.get_all().await
    }

    async fn delete_by_id(&self, id: ItemId) -> StorageResult<()> {
        self.check(&self.calls.delete_by_id, id)?;
        self.inner.delete_by_id(id).await
    }

    async fn replace_versioned(&self, replacement: &Item, previous: DateTime<Utc>) -> StorageResult<u64> {
        self.check(&self.calls.replace_versioned, replacement.id)?;
        self.inner.replace_versioned(replacement, previous).await
    }

    async fn update(&self, item: Item, if_match: &str) -> StorageResult<Item> {
        self.check(&self.calls.update, item.id)?;
        self.inner.update(item, if_match).await
    }
}
