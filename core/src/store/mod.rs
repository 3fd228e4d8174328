//! Persistence for `ToDoItem` records.
//!
//! # Design
//! `ToDoItemStore` is an explicit object owned by its caller; there is no
//! global connection. Every method is one request against the backend and
//! relies on that backend's own atomicity for a single statement. Nothing
//! here logs or retries: errors go straight back to the caller.
//!
//! `parent` is never validated. Deleting an item leaves its children in
//! place, pointing at an id that no longer resolves.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use crate::error::StoreError;
use crate::types::{BulkToDoItem, ItemId, ToDoItem, ToDoItemFields};

pub trait ToDoItemStore: Send + Sync {
    /// Insert a new record with a fresh id and timestamps.
    fn create(&self, fields: ToDoItemFields) -> Result<ToDoItem, StoreError>;

    /// Insert title-only records in one all-or-nothing batch.
    fn create_many(&self, items: Vec<BulkToDoItem>) -> Result<Vec<ToDoItem>, StoreError>;

    fn find(&self, id: ItemId) -> Result<Option<ToDoItem>, StoreError>;

    fn list_all(&self) -> Result<Vec<ToDoItem>, StoreError>;

    /// Every record whose `parent` text equals `parent`.
    fn list_children(&self, parent: &str) -> Result<Vec<ToDoItem>, StoreError>;

    /// Replace `title`, `parent` and `priority`, bumping `updated_at`.
    fn update(&self, id: ItemId, fields: ToDoItemFields) -> Result<ToDoItem, StoreError>;

    /// Remove one record. Children are left untouched.
    fn delete(&self, id: ItemId) -> Result<(), StoreError>;

    fn get_by_id(&self, id: ItemId) -> Result<ToDoItem, StoreError> {
        self.find(id)?.ok_or(StoreError::NotFound(id))
    }

    /// Resolve `item.parent`. A root, malformed or dangling reference yields
    /// `Ok(None)`.
    fn get_parent(&self, item: &ToDoItem) -> Result<Option<ToDoItem>, StoreError> {
        match item.parent_id() {
            Some(id) => self.find(id),
            None => Ok(None),
        }
    }
}
