//! Domain types for hierarchical to-do items.
//!
//! # Design
//! `parent` is kept as loose text, exactly as it is stored. It is resolved
//! to another item only on demand (see `ToDoItem::parent_id`), so a dangling
//! or malformed reference is an ordinary value rather than a broken
//! invariant.
//!
//! Each write operation has its own input struct listing the fields it
//! accepts. Unknown JSON fields are dropped on deserialization and missing
//! ones default to null.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a `ToDoItem`.
pub type ItemId = i64;

/// Conventional `parent` value of a top-level item.
pub const ROOT_PARENT: &str = "0";

/// A single persisted to-do item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToDoItem {
    pub id: ItemId,
    pub title: Option<String>,
    pub parent: Option<String>,
    pub priority: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ToDoItem {
    /// Interpret `parent` as an item id.
    ///
    /// Returns `None` when there is no parent, when it is the root sentinel,
    /// or when the text is not a positive integer. A `Some` id may still
    /// point at a record that does not exist.
    pub fn parent_id(&self) -> Option<ItemId> {
        let raw = self.parent.as_deref()?.trim();
        match raw.parse::<ItemId>() {
            Ok(id) if id > 0 => Some(id),
            _ => None,
        }
    }

    /// The key children of this item carry in their `parent` field.
    pub fn child_key(&self) -> String {
        self.id.to_string()
    }
}

/// Mutable fields accepted by create and update.
///
/// Update replaces all three fields; a field left out of the payload is
/// written as null.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ToDoItemFields {
    pub title: Option<String>,
    pub parent: Option<String>,
    pub priority: Option<i64>,
}

impl ToDoItemFields {
    pub const PERMITTED_FIELDS: &'static [&'static str] = &["title", "parent", "priority"];

    pub fn new(title: impl Into<String>, parent: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            parent: Some(parent.into()),
            priority: None,
        }
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }
}

/// Title-only entry accepted by bulk insert. Parent and priority stay null.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BulkToDoItem {
    pub title: Option<String>,
}

impl BulkToDoItem {
    pub const PERMITTED_FIELDS: &'static [&'static str] = &["title"];

    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
        }
    }
}

/// Response body of a bulk insert.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BulkInsertResult {
    pub count: usize,
    pub items: Vec<ToDoItem>,
}

/// An item together with its children and resolved parent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ToDoItemDetail {
    pub item: ToDoItem,
    pub children: Vec<ToDoItem>,
    pub parent: Option<ToDoItem>,
}

/// Describes the form a caller renders for creating or editing an item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemForm {
    pub action: String,
    pub method: String,
    pub fields: Vec<String>,
    pub defaults: ToDoItemFields,
}

impl ItemForm {
    pub fn for_new() -> Self {
        Self {
            action: "/items".to_string(),
            method: "POST".to_string(),
            fields: permitted(ToDoItemFields::PERMITTED_FIELDS),
            defaults: ToDoItemFields {
                parent: Some(ROOT_PARENT.to_string()),
                ..ToDoItemFields::default()
            },
        }
    }

    pub fn for_edit(id: ItemId) -> Self {
        Self {
            action: format!("/items/{id}"),
            method: "PUT".to_string(),
            fields: permitted(ToDoItemFields::PERMITTED_FIELDS),
            defaults: ToDoItemFields::default(),
        }
    }
}

fn permitted(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|f| f.to_string()).collect()
}
