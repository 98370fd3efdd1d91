//! Connection and transaction capabilities.
//!
//! The batch executor and the helpers only talk to a database through these
//! traits. A connection is opened and closed explicitly around every
//! operation; a transaction borrows its connection mutably, so at most one
//! transaction can be active on a connection at a time.

use crate::database::rows::Rows;
use crate::error::Result;

/// A single logical session to a database.
pub trait Connection {
    /// Transaction context produced by [`Connection::begin_transaction`].
    type Transaction<'c>: Transaction
    where
        Self: 'c;

    /// Open the session.
    ///
    /// Fails with [`DbError::Connection`](crate::DbError::Connection) when the
    /// database cannot be reached.
    fn open(&mut self) -> Result<()>;

    /// Close the session.
    ///
    /// Safe to call on a connection that is closed or only partially opened.
    /// Never fails; implementations log close errors instead.
    fn close(&mut self);

    /// Whether the session is currently open.
    fn is_open(&self) -> bool;

    /// Begin a transaction on the open session.
    fn begin_transaction(&mut self) -> Result<Self::Transaction<'_>>;

    /// Execute one statement that returns no rows, outside any transaction.
    ///
    /// Returns the number of affected rows.
    fn execute(&mut self, sql: &str) -> Result<usize>;

    /// Execute one statement and collect the rows it returns.
    fn query(&mut self, sql: &str) -> Result<Rows>;
}

/// Scope within which statements execute atomically.
pub trait Transaction {
    /// Execute one statement that returns no rows inside the transaction.
    fn execute(&mut self, sql: &str) -> Result<usize>;

    /// Make every statement executed so far durable.
    fn commit(self) -> Result<()>;

    /// Undo every statement executed so far.
    fn rollback(self) -> Result<()>;
}
