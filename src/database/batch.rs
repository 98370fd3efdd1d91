//! Transactional batch execution.
//!
//! Runs an ordered list of statements as one transaction:
//! - Statements run strictly in the given order
//! - The first failing statement stops the batch and triggers a single rollback
//! - A failed rollback is logged and recorded, never propagated
//! - The connection is opened at the start and closed on every exit path
//!
//! Commit failures are fatal: the connection is closed and the error is
//! returned, since the caller can no longer assume the batch applied.

use std::time::{Duration, Instant};

use crate::database::connection::{Connection, Transaction};
use crate::database::guard::ConnectionGuard;
use crate::error::{DbError, Result};

/// Options for a single batch invocation.
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Abort the batch if this instant passes before a statement or the
    /// commit starts.
    pub deadline: Option<Instant>,
}

impl BatchOptions {
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    /// Deadline measured from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    fn check_deadline(&self, index: usize) -> Result<()> {
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => {
                Err(DbError::DeadlineExceeded { index })
            }
            _ => Ok(()),
        }
    }
}

/// What happened to the rollback after a statement failed.
#[derive(Debug)]
pub enum RollbackStatus {
    RolledBack,
    /// The rollback itself failed. The connection was still closed.
    Failed(DbError),
}

/// Result of a batch that did not hit a fatal error.
#[derive(Debug)]
pub enum BatchOutcome {
    /// Every statement ran and the transaction committed.
    Committed { statements: usize },
    /// A statement failed; nothing after it ran and the transaction was
    /// rolled back (or the rollback attempt failed).
    RolledBack {
        failed_index: usize,
        error: DbError,
        rollback: RollbackStatus,
    },
}

impl BatchOutcome {
    /// Whether every statement in the batch committed.
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed { .. })
    }

    /// The statement error that stopped the batch, if any.
    pub fn error(&self) -> Option<&DbError> {
        match self {
            Self::Committed { .. } => None,
            Self::RolledBack { error, .. } => Some(error),
        }
    }
}

/// Execute `statements` as one transaction on `conn`.
///
/// See [`execute_batch_with`].
pub fn execute_batch<C, S>(conn: &mut C, statements: &[S]) -> Result<BatchOutcome>
where
    C: Connection,
    S: AsRef<str>,
{
    execute_batch_with(conn, statements, &BatchOptions::default())
}

/// Execute `statements` as one transaction on `conn`.
///
/// `conn` must be closed; it is opened for the batch and closed again before
/// this returns, whatever the outcome. An empty batch commits an empty
/// transaction.
///
/// # Errors
///
/// - [`DbError::AlreadyOpen`] if `conn` is already open
/// - [`DbError::Connection`] if the connection cannot be opened
/// - [`DbError::Begin`] if the transaction cannot be started
/// - [`DbError::Commit`] if every statement ran but the commit failed
///
/// Statement and rollback failures are reported through
/// [`BatchOutcome::RolledBack`].
#[tracing::instrument(name = "batch", skip_all, fields(statements = statements.len()))]
pub fn execute_batch_with<C, S>(
    conn: &mut C,
    statements: &[S],
    options: &BatchOptions,
) -> Result<BatchOutcome>
where
    C: Connection,
    S: AsRef<str>,
{
    let start = Instant::now();
    let mut guard = ConnectionGuard::open(conn)?;
    let mut tx = guard.begin_transaction().map_err(|e| {
        tracing::error!(error = %e, "Failed to begin transaction");
        e
    })?;

    if let Err((failed_index, error)) = run_statements(&mut tx, statements, options) {
        tracing::warn!(failed_index, error = %error, "Batch statement failed, rolling back");
        let rollback = match tx.rollback() {
            Ok(()) => RollbackStatus::RolledBack,
            Err(e) => {
                tracing::warn!(error = %e, "Rollback failed, closing connection anyway");
                RollbackStatus::Failed(e)
            }
        };
        return Ok(BatchOutcome::RolledBack {
            failed_index,
            error,
            rollback,
        });
    }

    if let Err(e) = tx.commit() {
        let e = match e {
            DbError::Commit(_) => e,
            other => DbError::Commit(other.to_string()),
        };
        tracing::error!(error = %e, "Batch commit failed");
        return Err(e);
    }

    tracing::info!(
        statements = statements.len(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Batch committed"
    );
    Ok(BatchOutcome::Committed {
        statements: statements.len(),
    })
}

/// Run every statement in order, stopping at the first failure.
fn run_statements<T, S>(
    tx: &mut T,
    statements: &[S],
    options: &BatchOptions,
) -> std::result::Result<(), (usize, DbError)>
where
    T: Transaction,
    S: AsRef<str>,
{
    for (index, statement) in statements.iter().enumerate() {
        let sql = statement.as_ref();
        options.check_deadline(index).map_err(|e| (index, e))?;
        tracing::debug!(index, sql, "Executing batch statement");
        tx.execute(sql)
            .map_err(|e| (index, statement_error(index, e)))?;
    }
    options
        .check_deadline(statements.len())
        .map_err(|e| (statements.len(), e))
}

fn statement_error(index: usize, err: DbError) -> DbError {
    match err {
        DbError::Statement { .. } | DbError::DeadlineExceeded { .. } => err,
        DbError::Sqlite(e) => DbError::statement(index, e.to_string()),
        other => DbError::statement(index, other.to_string()),
    }
}
