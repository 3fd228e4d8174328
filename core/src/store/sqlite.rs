use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::ToDoItemStore;
use crate::error::{StorageFailure, StoreError};
use crate::types::{BulkToDoItem, ItemId, ToDoItem, ToDoItemFields};

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS to_do_items (
  id INTEGER PRIMARY KEY AUTOINCREMENT,
  title TEXT,
  parent TEXT,
  priority NUMERIC,
  created_at TEXT NOT NULL,
  updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_to_do_items_parent ON to_do_items(parent);
"#;

const SELECT_COLUMNS: &str = "id, title, parent, priority, created_at, updated_at";

/// SQLite-backed store over the `to_do_items` table.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: Option<PathBuf>,
}

impl SqliteStore {
    /// Open (or create) a database file, creating its directory if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let conn = Connection::open(&path)?;
        let store = Self {
            conn: Mutex::new(conn),
            db_path: Some(path),
        };
        store.migrate()?;
        Ok(store)
    }

    pub fn in_memory() -> Result<Self, StoreError> {
        let store = Self {
            conn: Mutex::new(Connection::open_in_memory()?),
            db_path: None,
        };
        store.migrate()?;
        Ok(store)
    }

    pub fn db_path(&self) -> Option<&Path> {
        self.db_path.as_deref()
    }

    fn migrate(&self) -> Result<(), StoreError> {
        let conn = self.conn()?;
        // In-memory databases have no WAL.
        if self.db_path.is_some() {
            conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        }
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Storage(StorageFailure::Poisoned))
    }
}

fn insert_row(conn: &Connection, fields: &ToDoItemFields) -> rusqlite::Result<ToDoItem> {
    let now = Utc::now();
    conn.execute(
        "INSERT INTO to_do_items (title, parent, priority, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?4)",
        params![fields.title, fields.parent, fields.priority, now],
    )?;
    Ok(ToDoItem {
        id: conn.last_insert_rowid(),
        title: fields.title.clone(),
        parent: fields.parent.clone(),
        priority: fields.priority,
        created_at: now,
        updated_at: now,
    })
}

fn read_row(row: &Row<'_>) -> rusqlite::Result<ToDoItem> {
    Ok(ToDoItem {
        id: row.get(0)?,
        title: row.get(1)?,
        parent: row.get(2)?,
        priority: row.get(3)?,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

fn select_where(
    conn: &Connection,
    clause: &str,
    args: impl rusqlite::Params,
) -> rusqlite::Result<Vec<ToDoItem>> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM to_do_items {clause} ORDER BY id");
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(args, read_row)?;
    rows.collect()
}

impl ToDoItemStore for SqliteStore {
    fn create(&self, fields: ToDoItemFields) -> Result<ToDoItem, StoreError> {
        let conn = self.conn()?;
        Ok(insert_row(&conn, &fields)?)
    }

    fn create_many(&self, items: Vec<BulkToDoItem>) -> Result<Vec<ToDoItem>, StoreError> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let fields = ToDoItemFields {
                title: item.title,
                ..ToDoItemFields::default()
            };
            created.push(insert_row(&tx, &fields)?);
        }
        tx.commit()?;
        Ok(created)
    }

    fn find(&self, id: ItemId) -> Result<Option<ToDoItem>, StoreError> {
        let conn = self.conn()?;
        let sql = format!("SELECT {SELECT_COLUMNS} FROM to_do_items WHERE id = ?1");
        Ok(conn.query_row(&sql, params![id], read_row).optional()?)
    }

    fn list_all(&self) -> Result<Vec<ToDoItem>, StoreError> {
        let conn = self.conn()?;
        Ok(select_where(&conn, "", [])?)
    }

    fn list_children(&self, parent: &str) -> Result<Vec<ToDoItem>, StoreError> {
        let conn = self.conn()?;
        Ok(select_where(&conn, "WHERE parent = ?1", params![parent])?)
    }

    fn update(&self, id: ItemId, fields: ToDoItemFields) -> Result<ToDoItem, StoreError> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE to_do_items SET title = ?1, parent = ?2, priority = ?3, updated_at = ?4
             WHERE id = ?5",
            params![fields.title, fields.parent, fields.priority, Utc::now(), id],
        )?;
        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }
        let sql = format!("SELECT {SELECT_COLUMNS} FROM to_do_items WHERE id = ?1");
        Ok(conn.query_row(&sql, params![id], read_row)?)
    }

    fn delete(&self, id: ItemId) -> Result<(), StoreError> {
        let conn = self.conn()?;
        let removed = conn.execute("DELETE FROM to_do_items WHERE id = ?1", params![id])?;
        if removed == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }
}
