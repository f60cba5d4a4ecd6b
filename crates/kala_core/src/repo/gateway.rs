//! Storage gateway contract and implementations.
//!
//! # Responsibility
//! - Expose the two operations the core depends on: `get` and `set` over a
//!   generic string-keyed store.
//! - Provide a SQLite-backed implementation for durable use and an
//!   in-memory one for tests and prototyping.
//!
//! # Invariants
//! - `set` replaces the full value for a key; there is no partial write.
//! - No transactionality is assumed across distinct keys.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{self, Display, Formatter};

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Failure of a durable read or write.
#[derive(Debug)]
pub enum GatewayError {
    Db(DbError),
}

impl Display for GatewayError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for GatewayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
        }
    }
}

impl From<DbError> for GatewayError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for GatewayError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Generic string-keyed durable store.
///
/// Implementations are expected to be durable-on-return for `set`; the
/// services issue one `set` per committed mutation.
pub trait StorageGateway {
    fn get(&self, key: &str) -> GatewayResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> GatewayResult<()>;
}

/// SQLite-backed gateway over the `workspace_kv` table.
pub struct SqliteStorageGateway {
    conn: Connection,
}

impl SqliteStorageGateway {
    /// Wraps a migrated connection from [`crate::db::open_db`] or
    /// [`crate::db::open_db_in_memory`].
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }

    /// Releases the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }
}

impl StorageGateway for SqliteStorageGateway {
    fn get(&self, key: &str) -> GatewayResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM workspace_kv WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> GatewayResult<()> {
        self.conn.execute(
            "INSERT INTO workspace_kv (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-memory gateway for tests and UI prototyping.
#[derive(Debug, Default)]
pub struct MemoryStorageGateway {
    entries: BTreeMap<String, String>,
}

impl MemoryStorageGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys, handy for asserting write behavior in tests.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorageGateway for MemoryStorageGateway {
    fn get(&self, key: &str) -> GatewayResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> GatewayResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
