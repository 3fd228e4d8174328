//! Hierarchical to-do items: data model, storage and API client.
//!
//! # Overview
//! A `ToDoItem` has a title, an optional priority and a loose `parent`
//! reference to another item's id. The reference is plain text and is never
//! validated, so items can point at parents that do not exist.
//!
//! # Design
//! - `ToDoItemStore` is the single persistence seam, with an in-memory and a
//!   SQLite backend.
//! - Create/update and bulk insert each take their own input struct naming
//!   the accepted fields.
//! - `ItemsClient` builds and parses HTTP messages for the items API without
//!   touching the network (host-does-IO).

pub mod client;
pub mod error;
pub mod http;
pub mod store;
pub mod types;

pub use client::ItemsClient;
pub use error::{ApiError, StorageFailure, StoreError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use store::{MemoryStore, SqliteStore, ToDoItemStore};
pub use types::{
    BulkInsertResult, BulkToDoItem, ItemForm, ItemId, ToDoItem, ToDoItemDetail, ToDoItemFields,
    ROOT_PARENT,
};
