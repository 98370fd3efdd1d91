//! Database access layer.
//!
//! Provides:
//! - Connection and transaction capability traits
//! - SQLite implementation of the capability
//! - Scoped connection guard that closes on every exit path
//! - Transactional batch executor
//! - Query, command and projection helpers

pub mod batch;
pub mod connection;
pub mod facade;
pub mod guard;
pub mod rows;
pub mod sqlite;

#[cfg(test)]
pub(crate) mod scripted;

pub use batch::{execute_batch, execute_batch_with, BatchOptions, BatchOutcome, RollbackStatus};
pub use connection::{Connection, Transaction};
pub use facade::{projection_query, Database};
pub use guard::ConnectionGuard;
pub use rows::{Rows, Value};
pub use sqlite::{SqliteConnection, SqliteOptions, SqliteTarget, SqliteTransaction};
