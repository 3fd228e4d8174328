//! Error types for the item store and the HTTP client.
//!
//! # Design
//! `StoreError::NotFound` is the only caller mistake a store reports. Every
//! other failure is a `Storage` error wrapping whatever the backend raised.
//! A parent that cannot be resolved is not an error at all; lookups return
//! `Option` for that case.
//!
//! `ApiError` mirrors the same split on the client side: 404 gets its own
//! variant, every other unexpected status lands in `HttpError` with the raw
//! status code and body.

use thiserror::Error;

use crate::types::ItemId;

/// Errors returned by `ToDoItemStore` operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record with this id exists.
    #[error("to-do item {0} not found")]
    NotFound(ItemId),

    /// The backend failed to carry out the operation.
    #[error("storage failure: {0}")]
    Storage(#[from] StorageFailure),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        StoreError::Storage(StorageFailure::Sql(err))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::Storage(StorageFailure::Io(err))
    }
}

/// Backend-specific cause of a `StoreError::Storage`.
#[derive(Debug, Error)]
pub enum StorageFailure {
    #[error("sqlite: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    /// A thread panicked while holding the backend lock.
    #[error("store lock poisoned")]
    Poisoned,
}

/// Errors returned by `ItemsClient` build and parse methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server returned 404; the requested item does not exist.
    #[error("resource not found")]
    NotFound,

    /// The server returned a non-2xx status other than 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}
