use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::{Result, StoreError};

/// Schema is applied idempotently every time a handle is opened.
/// Composite UNIQUE constraints are what make the insert-or-ignore
/// operations in the stores no-ops on duplicates.
const SCHEMA_SQL: &str = "
CREATE TABLE IF NOT EXISTS items (
    item_id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    rating REAL NOT NULL DEFAULT 0,
    address TEXT NOT NULL DEFAULT '',
    image_url TEXT NOT NULL DEFAULT '',
    url TEXT NOT NULL DEFAULT '',
    distance REAL NOT NULL DEFAULT 0,
    cached_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    item_id TEXT NOT NULL,
    category TEXT NOT NULL,
    UNIQUE(item_id, category)
);

CREATE TABLE IF NOT EXISTS history (
    user_id TEXT NOT NULL,
    item_id TEXT NOT NULL,
    UNIQUE(user_id, item_id)
);
";

/// Live connection to the local store.
///
/// One handle per logical operation: open it, run the operation, let it
/// drop. The stores borrow the handle, so no operation can run without a
/// live one - acquisition failure surfaces as [`StoreError::Unavailable`]
/// up front, uniformly for reads and writes.
#[derive(Debug)]
pub struct StoreHandle {
    conn: Connection,
}

impl StoreHandle {
    /// Open (or create) the store at the given path.
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Self::init_schema(&conn)?;
        debug!("Opened store at {}", path.display());
        Ok(Self { conn })
    }

    /// In-memory store, used by tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Self::init_schema(&conn)?;
        Ok(Self { conn })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}
