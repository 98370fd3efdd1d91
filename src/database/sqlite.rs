//! SQLite implementation of the connection capability.

use rusqlite::{Connection as RusqliteConnection, OpenFlags};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::database::connection::{Connection, Transaction};
use crate::database::rows::{Rows, Value};
use crate::error::{DbError, Result};

/// Where the SQLite database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqliteTarget {
    File(PathBuf),
    /// Private in-memory database. Its contents are discarded on close.
    Memory,
}

/// Options applied every time a [`SqliteConnection`] is opened.
#[derive(Debug, Clone)]
pub struct SqliteOptions {
    pub target: SqliteTarget,
    pub busy_timeout: Duration,
    pub foreign_keys: bool,
}

impl SqliteOptions {
    pub fn file<P: AsRef<Path>>(path: P) -> Self {
        Self {
            target: SqliteTarget::File(path.as_ref().to_path_buf()),
            ..Self::in_memory()
        }
    }

    pub fn in_memory() -> Self {
        Self {
            target: SqliteTarget::Memory,
            busy_timeout: Duration::from_secs(5),
            foreign_keys: true,
        }
    }

    #[must_use]
    pub fn busy_timeout(mut self, timeout: Duration) -> Self {
        self.busy_timeout = timeout;
        self
    }

    #[must_use]
    pub fn foreign_keys(mut self, enabled: bool) -> Self {
        self.foreign_keys = enabled;
        self
    }
}

/// A SQLite session that is opened and closed on demand.
pub struct SqliteConnection {
    options: SqliteOptions,
    conn: Option<RusqliteConnection>,
}

impl SqliteConnection {
    /// Create a closed connection for the given options.
    pub fn new(options: SqliteOptions) -> Self {
        Self {
            options,
            conn: None,
        }
    }

    pub fn options(&self) -> &SqliteOptions {
        &self.options
    }

    fn connect(&self) -> Result<RusqliteConnection> {
        let conn = match &self.options.target {
            SqliteTarget::Memory => RusqliteConnection::open_in_memory().map_err(|e| {
                DbError::Connection(format!("Failed to open in-memory database: {e}"))
            })?,
            SqliteTarget::File(path) => {
                let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
                    | OpenFlags::SQLITE_OPEN_CREATE
                    | OpenFlags::SQLITE_OPEN_URI
                    | OpenFlags::SQLITE_OPEN_NO_MUTEX;
                RusqliteConnection::open_with_flags(path, flags).map_err(|e| {
                    DbError::Connection(format!(
                        "Failed to open SQLite database at '{}': {e}",
                        path.display()
                    ))
                })?
            }
        };

        conn.busy_timeout(self.options.busy_timeout)
            .map_err(|e| DbError::Connection(format!("Failed to set busy timeout: {e}")))?;
        conn.pragma_update(None, "foreign_keys", self.options.foreign_keys)
            .map_err(|e| DbError::Connection(format!("Failed to set foreign keys: {e}")))?;

        Ok(conn)
    }

    fn session(&mut self) -> Result<&mut RusqliteConnection> {
        self.conn.as_mut().ok_or(DbError::NotOpen)
    }
}

impl Connection for SqliteConnection {
    type Transaction<'c> = SqliteTransaction<'c>;

    fn open(&mut self) -> Result<()> {
        if self.conn.is_some() {
            return Err(DbError::AlreadyOpen);
        }
        let conn = self.connect()?;
        tracing::debug!(target_db = ?self.options.target, "SQLite connection opened");
        self.conn = Some(conn);
        Ok(())
    }

    fn close(&mut self) {
        let Some(conn) = self.conn.take() else {
            return;
        };
        // A failed close hands the connection back; dropping it releases the handle.
        if let Err((_conn, e)) = conn.close() {
            tracing::warn!(error = %e, "SQLite connection did not close cleanly");
        } else {
            tracing::debug!("SQLite connection closed");
        }
    }

    fn is_open(&self) -> bool {
        self.conn.is_some()
    }

    fn begin_transaction(&mut self) -> Result<SqliteTransaction<'_>> {
        let tx = self
            .session()?
            .transaction()
            .map_err(|e| DbError::Begin(e.to_string()))?;
        Ok(SqliteTransaction { tx })
    }

    fn execute(&mut self, sql: &str) -> Result<usize> {
        Ok(self.session()?.execute(sql, [])?)
    }

    fn query(&mut self, sql: &str) -> Result<Rows> {
        let conn = self.session()?;
        let mut stmt = conn.prepare(sql)?;
        let column_count = stmt.column_count();
        let mut result = Rows::new(stmt.column_names().into_iter().map(String::from).collect());

        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(column_count);
            for idx in 0..column_count {
                values.push(Value::from(row.get_ref(idx)?));
            }
            result.rows.push(values);
        }
        Ok(result)
    }
}

impl Drop for SqliteConnection {
    fn drop(&mut self) {
        self.close();
    }
}

/// SQLite transaction context.
///
/// Dropped without commit or rollback, the underlying transaction rolls back.
pub struct SqliteTransaction<'c> {
    tx: rusqlite::Transaction<'c>,
}

impl Transaction for SqliteTransaction<'_> {
    fn execute(&mut self, sql: &str) -> Result<usize> {
        Ok(self.tx.execute(sql, [])?)
    }

    fn commit(self) -> Result<()> {
        self.tx.commit().map_err(|e| DbError::Commit(e.to_string()))
    }

    fn rollback(self) -> Result<()> {
        self.tx
            .rollback()
            .map_err(|e| DbError::Rollback(e.to_string()))
    }
}
