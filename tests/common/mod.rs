//! Test utilities for dbkit integration tests.
//!
//! Provides:
//! - Temporary SQLite database fixtures
//! - Read-back helpers for asserting table contents

#![allow(dead_code)]

use dbkit::{Database, SqliteConnection, SqliteOptions, Value};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture that manages a temporary database directory.
///
/// The directory is automatically cleaned up when the fixture is dropped.
pub struct TestFixture {
    /// Temporary directory for test database
    pub temp_dir: TempDir,
    /// Path to the database file
    pub db_path: PathBuf,
}

impl TestFixture {
    /// Create a new test fixture with a temporary database directory.
    pub fn new() -> Self {
        dbkit::observability::tracing::init_test_tracing();
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        Self { temp_dir, db_path }
    }

    /// A closed connection to the fixture database.
    pub fn connection(&self) -> SqliteConnection {
        SqliteConnection::new(SqliteOptions::file(&self.db_path))
    }

    /// A database wrapper over a fresh connection.
    pub fn database(&self) -> Database<SqliteConnection> {
        Database::new(self.connection())
    }

    /// Create a fixture whose database already ran `schema`.
    pub fn with_schema(schema: &[&str]) -> Self {
        let fixture = Self::new();
        let mut db = fixture.database();
        for statement in schema {
            db.execute_command(statement).expect("schema statement failed");
        }
        fixture
    }

    /// Read back the number of rows in `table`.
    pub fn count_rows(&self, table: &str) -> i64 {
        let rows = self
            .database()
            .execute_query(&format!("SELECT COUNT(*) FROM {table}"))
            .expect("count query failed");
        match rows.rows[0][0] {
            Value::Integer(n) => n,
            ref other => panic!("unexpected count value: {other:?}"),
        }
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.temp_dir.path().exists());
        assert!(fixture.db_path.ends_with("test.db"));
    }
}
