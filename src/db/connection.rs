use rusqlite::Connection;
use std::cell::RefCell;
use std::collections::HashMap;
use tracing::{debug, info};

use crate::errors::ServerError;

const SCHEMA_SQL: &str = include_str!("../../sql/schema.sql");

// Per-thread connections, keyed by database path.
thread_local! {
    static DB_CONNS: RefCell<HashMap<String, Connection>> = RefCell::new(HashMap::new());
}

#[derive(Clone, Debug)]
pub struct Database {
    path: String,
}

impl Database {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Provides a mutable connection to the closure.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, ServerError>
    where
        F: FnOnce(&mut Connection) -> Result<T, ServerError>,
    {
        DB_CONNS
            .try_with(|cell| {
                let mut conns = cell.borrow_mut();
                if !conns.contains_key(&self.path) {
                    conns.insert(self.path.clone(), open(&self.path)?);
                }
                let conn = conns
                    .get_mut(&self.path)
                    .ok_or(ServerError::InternalError)?;
                f(conn)
            })
            .map_err(|_| ServerError::InternalError)?
    }
}

fn open(path: &str) -> Result<Connection, ServerError> {
    let conn = Connection::open(path)
        .map_err(|e| ServerError::DbError(format!("Open DB failed: {e}")))?;
    conn.execute_batch("pragma foreign_keys = on;")
        .map_err(|e| ServerError::DbError(format!("Enable foreign keys failed: {e}")))?;
    debug!(path, "opened sqlite connection");
    Ok(conn)
}

/// Apply the embedded schema. Safe to run on every startup.
pub fn init_db(db: &Database) -> Result<(), ServerError> {
    db.with_conn(|conn| {
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| ServerError::DbError(format!("Failed to apply schema: {e}")))
    })?;

    info!(path = db.path(), "database initialized");
    Ok(())
}
