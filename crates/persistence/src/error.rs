//! Error types for the persistence layer.
//!
//! Every store operation reports failures as a [`StorageError`]. Backends do
//! not build those directly from driver errors; they first reduce the driver
//! error to a [`BackendFailure`] and hand it to [`StorageError::classify`],
//! which is the single place where the taxonomy is decided:
//!
//! | Backend failure | Classified as |
//! |-----------------|---------------|
//! | no matching document | [`StorageError::NotFound`] |
//! | duplicate key | [`StorageError::Conflict`] |
//! | anything else | [`StorageError::Unclassified`] |
//!
//! [`StorageError::Outdated`] is never produced by a driver. It comes from the
//! version token comparison in [`core::versioned`](crate::core::versioned).

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use std::fmt;

use thiserror::Error;

use crate::types::ItemId;

/// Boxed error carried as the source of an unclassified failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The error type for all storage operations.
#[derive(Error, Debug)]
pub enum StorageError {
    /// No item with the given id exists.
    #[error("item with id {id} not found")]
    NotFound { id: ItemId },

    /// The update carried a version token that no longer matches the stored item.
    #[error("update request is outdated")]
    Outdated {
        id: ItemId,
        expected: String,
        actual: String,
    },

    /// An item with the same id already exists.
    #[error("attempted to save item with same id")]
    Conflict { id: ItemId },

    /// Any other failure. The message is kept verbatim.
    #[error("unclassified error: {message}")]
    Unclassified {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// The category of a [`StorageError`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    Outdated,
    Conflict,
    Unclassified,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::NotFound => write!(f, "not_found"),
            ErrorKind::Outdated => write!(f, "outdated"),
            ErrorKind::Conflict => write!(f, "conflict"),
            ErrorKind::Unclassified => write!(f, "unclassified"),
        }
    }
}

/// A raw backend failure, reduced to the distinctions the classifier cares about.
#[derive(Error, Debug)]
pub enum BackendFailure {
    /// The query matched no document.
    #[error("no document matched the query")]
    NoMatchingDocument,

    /// A unique index rejected the write.
    #[error("duplicate key")]
    DuplicateKey,

    /// Any other driver error.
    #[error(transparent)]
    Other(BoxError),
}

impl BackendFailure {
    /// Wraps an arbitrary error as an unrecognized failure.
    pub fn other<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        BackendFailure::Other(Box::new(err))
    }
}

impl StorageError {
    /// Translates a backend failure into the storage error taxonomy.
    ///
    /// `id` names the item the operation was about; it is carried into
    /// `NotFound` and `Conflict`.
    pub fn classify(failure: BackendFailure, id: ItemId) -> Self {
        match failure {
            BackendFailure::NoMatchingDocument => StorageError::NotFound { id },
            BackendFailure::DuplicateKey => StorageError::Conflict { id },
            BackendFailure::Other(source) => StorageError::Unclassified {
                message: source.to_string(),
                source: Some(source),
            },
        }
    }

    /// Creates an unclassified error from a bare message.
    pub fn unclassified(message: impl Into<String>) -> Self {
        StorageError::Unclassified {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an unclassified error that keeps the underlying error as its source.
    pub fn unclassified_with<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        StorageError::Unclassified {
            message: err.to_string(),
            source: Some(Box::new(err)),
        }
    }

    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::NotFound { .. } => ErrorKind::NotFound,
            StorageError::Outdated { .. } => ErrorKind::Outdated,
            StorageError::Conflict { .. } => ErrorKind::Conflict,
            StorageError::Unclassified { .. } => ErrorKind::Unclassified,
        }
    }

    /// Returns true if this is a `NotFound` error.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    /// Returns true if this is an `Outdated` error.
    pub fn is_outdated(&self) -> bool {
        self.kind() == ErrorKind::Outdated
    }
}

#[cfg(feature = "sqlite")]
impl From<rusqlite::Error> for BackendFailure {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::QueryReturnedNoRows => BackendFailure::NoMatchingDocument,
            rusqlite::Error::SqliteFailure(ref code, _)
                if code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || code.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                BackendFailure::DuplicateKey
            }
            other => BackendFailure::other(other),
        }
    }
}

#[cfg(feature = "mongodb")]
impl From<mongodb::error::Error> for BackendFailure {
    fn from(err: mongodb::error::Error) -> Self {
        use mongodb::error::{ErrorKind as MongoErrorKind, WriteFailure};

        const DUPLICATE_KEY_CODE: i32 = 11000;

        match err.kind.as_ref() {
            MongoErrorKind::Write(WriteFailure::WriteError(write_error))
                if write_error.code == DUPLICATE_KEY_CODE =>
            {
                BackendFailure::DuplicateKey
            }
            _ => BackendFailure::other(err),
        }
    }
}
