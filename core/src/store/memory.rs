use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;

use super::ToDoItemStore;
use crate::error::{StorageFailure, StoreError};
use crate::types::{BulkToDoItem, ItemId, ToDoItem, ToDoItemFields};

/// In-process store. Contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Table>,
}

#[derive(Debug, Default)]
struct Table {
    rows: BTreeMap<ItemId, ToDoItem>,
    last_id: ItemId,
}

impl Table {
    // Ids only ever grow so a deleted id never comes back.
    fn insert(&mut self, fields: ToDoItemFields) -> ToDoItem {
        self.last_id += 1;
        let now = Utc::now();
        let item = ToDoItem {
            id: self.last_id,
            title: fields.title,
            parent: fields.parent,
            priority: fields.priority,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(item.id, item.clone());
        item
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Table>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Storage(StorageFailure::Poisoned))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Table>, StoreError> {
        self.inner
            .write()
            .map_err(|_| StoreError::Storage(StorageFailure::Poisoned))
    }
}

impl ToDoItemStore for MemoryStore {
    fn create(&self, fields: ToDoItemFields) -> Result<ToDoItem, StoreError> {
        Ok(self.write()?.insert(fields))
    }

    fn create_many(&self, items: Vec<BulkToDoItem>) -> Result<Vec<ToDoItem>, StoreError> {
        let mut table = self.write()?;
        Ok(items
            .into_iter()
            .map(|item| {
                table.insert(ToDoItemFields {
                    title: item.title,
                    ..ToDoItemFields::default()
                })
            })
            .collect())
    }

    fn find(&self, id: ItemId) -> Result<Option<ToDoItem>, StoreError> {
        Ok(self.read()?.rows.get(&id).cloned())
    }

    fn list_all(&self) -> Result<Vec<ToDoItem>, StoreError> {
        Ok(self.read()?.rows.values().cloned().collect())
    }

    fn list_children(&self, parent: &str) -> Result<Vec<ToDoItem>, StoreError> {
        Ok(self
            .read()?
            .rows
            .values()
            .filter(|item| item.parent.as_deref() == Some(parent))
            .cloned()
            .collect())
    }

    fn update(&self, id: ItemId, fields: ToDoItemFields) -> Result<ToDoItem, StoreError> {
        let mut table = self.write()?;
        let item = table.rows.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        item.title = fields.title;
        item.parent = fields.parent;
        item.priority = fields.priority;
        item.updated_at = Utc::now();
        Ok(item.clone())
    }

    fn delete(&self, id: ItemId) -> Result<(), StoreError> {
        self.write()?
            .rows
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }
}
