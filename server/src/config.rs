//! Command-line and environment configuration for the server binary.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use todo_core::{MemoryStore, SqliteStore, StoreError};

use crate::SharedStore;

#[derive(Parser, Debug, Clone)]
#[command(name = "todo-server", version, about = "Hierarchical to-do items over HTTP")]
pub struct Config {
    /// Interface to bind
    #[arg(long, env = "TODO_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to bind
    #[arg(long, env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// SQLite database file; items are kept in memory when unset
    #[arg(long, env = "TODO_DATABASE")]
    pub database: Option<PathBuf>,
}

impl Config {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn backend_name(&self) -> &'static str {
        if self.database.is_some() {
            "sqlite"
        } else {
            "memory"
        }
    }

    pub fn open_store(&self) -> Result<SharedStore, StoreError> {
        Ok(match &self.database {
            Some(path) => Arc::new(SqliteStore::open(path)?),
            None => Arc::new(MemoryStore::new()),
        })
    }
}
