//! Query, command and projection helpers.
//!
//! [`Database`] wraps a connection handle and opens it around every call.
//! Nothing here is atomic across calls; use a batch when several statements
//! must apply together.

use crate::database::batch::{self, BatchOptions, BatchOutcome};
use crate::database::connection::Connection;
use crate::database::guard::ConnectionGuard;
use crate::database::rows::Rows;
use crate::error::Result;

/// Build a statement that reads every row of `table`.
///
/// With no columns the statement selects `*`; otherwise the columns are
/// joined in the given order. Names are used verbatim.
pub fn projection_query<S: AsRef<str>>(table: &str, columns: &[S]) -> String {
    if columns.is_empty() {
        return format!("SELECT * FROM {table}");
    }
    let columns: Vec<&str> = columns.iter().map(|c| c.as_ref()).collect();
    format!("SELECT {} FROM {table}", columns.join(", "))
}

/// Connection wrapper exposing single-call helpers and atomic batches.
pub struct Database<C: Connection> {
    conn: C,
}

impl<C: Connection> Database<C> {
    /// Wrap a closed connection.
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &C {
        &self.conn
    }

    pub fn connection_mut(&mut self) -> &mut C {
        &mut self.conn
    }

    pub fn into_inner(self) -> C {
        self.conn
    }

    /// Run one row-returning statement and return its rows.
    #[tracing::instrument(skip(self))]
    pub fn execute_query(&mut self, sql: &str) -> Result<Rows> {
        let mut conn = ConnectionGuard::open(&mut self.conn)?;
        let rows = conn.query(sql)?;
        tracing::debug!(rows = rows.len(), "Query returned rows");
        Ok(rows)
    }

    /// Run one statement that returns no rows.
    ///
    /// Returns the number of affected rows.
    #[tracing::instrument(skip(self))]
    pub fn execute_command(&mut self, sql: &str) -> Result<usize> {
        let mut conn = ConnectionGuard::open(&mut self.conn)?;
        conn.execute(sql)
    }

    /// Run `statements` as one transaction and report whether it committed.
    ///
    /// Statement failures yield `Ok(false)`; see
    /// [`execute_batch_with`](batch::execute_batch_with) for the errors that
    /// are returned instead.
    pub fn execute_commands<S: AsRef<str>>(&mut self, statements: &[S]) -> Result<bool> {
        Ok(self.execute_batch(statements)?.is_committed())
    }

    pub fn execute_batch<S: AsRef<str>>(&mut self, statements: &[S]) -> Result<BatchOutcome> {
        batch::execute_batch(&mut self.conn, statements)
    }

    pub fn execute_batch_with<S: AsRef<str>>(
        &mut self,
        statements: &[S],
        options: &BatchOptions,
    ) -> Result<BatchOutcome> {
        batch::execute_batch_with(&mut self.conn, statements, options)
    }

    /// Read every row of `table`, restricted to `columns` when non-empty.
    pub fn select<S: AsRef<str>>(&mut self, table: &str, columns: &[S]) -> Result<Rows> {
        self.execute_query(&projection_query(table, columns))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::scripted::{Script, ScriptedConnection};
    use crate::error::DbError;

    #[test]
    fn test_projection_query_all_columns() {
        let columns: [&str; 0] = [];
        assert_eq!(projection_query("users", &columns), "SELECT * FROM users");
    }

    #[test]
    fn test_projection_query_preserves_column_order() {
        assert_eq!(
            projection_query("users", &["name", "id", "email"]),
            "SELECT name, id, email FROM users"
        );
    }

    #[test]
    fn test_helpers_open_and_close_each_call() {
        let mut db = Database::new(ScriptedConnection::new(Script::default()));

        let rows = db.execute_query("SELECT 1").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(db.execute_command("DELETE FROM t").unwrap(), 1);
        db.select("t", &["a", "b"]).unwrap();

        let conn = db.connection();
        assert!(!conn.is_open());
        assert_eq!((conn.log().opens, conn.log().closes), (3, 3));
        assert_eq!(
            conn.log().executed,
            vec!["SELECT 1", "DELETE FROM t", "SELECT a, b FROM t"]
        );
    }

    #[test]
    fn test_execute_commands_reports_boolean() {
        let mut ok = Database::new(ScriptedConnection::new(Script::default()));
        assert!(ok.execute_commands(&["A", "B"]).unwrap());

        let mut failing = Database::new(ScriptedConnection::new(Script {
            fail_statement: Some(0),
            ..Script::default()
        }));
        assert!(!failing.execute_commands(&["A", "B"]).unwrap());
        assert!(!failing.connection().is_open());
    }

    #[test]
    fn test_helper_open_failure_propagates() {
        let mut db = Database::new(ScriptedConnection::new(Script {
            fail_open: true,
            ..Script::default()
        }));
        assert!(matches!(
            db.execute_query("SELECT 1"),
            Err(DbError::Connection(_))
        ));
        assert!(matches!(
            db.execute_commands(&["A"]),
            Err(DbError::Connection(_))
        ));
        assert_eq!(db.connection().log().closes, 2);
    }
}
