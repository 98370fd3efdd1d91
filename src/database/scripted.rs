//! Failure-injecting connection for executor tests.

use std::time::Duration;

use crate::database::connection::{Connection, Transaction};
use crate::database::rows::{Rows, Value};
use crate::error::{DbError, Result};

/// Which operations a [`ScriptedConnection`] should fail.
#[derive(Debug, Clone, Default)]
pub struct Script {
    pub fail_open: bool,
    pub fail_begin: bool,
    /// Fail the statement at this position within a transaction.
    pub fail_statement: Option<usize>,
    pub fail_commit: bool,
    pub fail_rollback: bool,
    /// Sleep this long inside every statement.
    pub statement_delay: Option<Duration>,
}

/// Final state of the last transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TxState {
    Active,
    Committed,
    RolledBack,
    RollbackFailed,
    Abandoned,
}

/// Everything the connection was asked to do.
#[derive(Debug, Default)]
pub struct ExecutionLog {
    pub opens: usize,
    pub closes: usize,
    pub begins: usize,
    pub commits: usize,
    pub rollbacks: usize,
    pub executed: Vec<String>,
    pub tx_state: Option<TxState>,
}

pub struct ScriptedConnection {
    script: Script,
    open: bool,
    log: ExecutionLog,
}

impl ScriptedConnection {
    pub fn new(script: Script) -> Self {
        Self {
            script,
            open: false,
            log: ExecutionLog::default(),
        }
    }

    pub fn log(&self) -> &ExecutionLog {
        &self.log
    }
}

impl Connection for ScriptedConnection {
    type Transaction<'c> = ScriptedTransaction<'c>;

    fn open(&mut self) -> Result<()> {
        self.log.opens += 1;
        if self.script.fail_open {
            return Err(DbError::Connection("connection refused".into()));
        }
        self.open = true;
        Ok(())
    }

    fn close(&mut self) {
        self.log.closes += 1;
        self.open = false;
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn begin_transaction(&mut self) -> Result<ScriptedTransaction<'_>> {
        if !self.open {
            return Err(DbError::NotOpen);
        }
        self.log.begins += 1;
        if self.script.fail_begin {
            return Err(DbError::Begin("database is locked".into()));
        }
        self.log.tx_state = Some(TxState::Active);
        Ok(ScriptedTransaction {
            conn: self,
            position: 0,
            finished: false,
        })
    }

    fn execute(&mut self, sql: &str) -> Result<usize> {
        if !self.open {
            return Err(DbError::NotOpen);
        }
        self.log.executed.push(sql.to_string());
        Ok(1)
    }

    fn query(&mut self, sql: &str) -> Result<Rows> {
        if !self.open {
            return Err(DbError::NotOpen);
        }
        self.log.executed.push(sql.to_string());
        Ok(Rows {
            columns: vec!["sql".into()],
            rows: vec![vec![Value::Text(sql.to_string())]],
        })
    }
}

pub struct ScriptedTransaction<'c> {
    conn: &'c mut ScriptedConnection,
    position: usize,
    finished: bool,
}

impl ScriptedTransaction<'_> {
    fn finish(mut self, state: TxState) {
        self.conn.log.tx_state = Some(state);
        self.finished = true;
    }
}

impl Transaction for ScriptedTransaction<'_> {
    fn execute(&mut self, sql: &str) -> Result<usize> {
        let position = self.position;
        self.position += 1;
        if let Some(delay) = self.conn.script.statement_delay {
            std::thread::sleep(delay);
        }
        if self.conn.script.fail_statement == Some(position) {
            return Err(DbError::statement(position, "UNIQUE constraint failed"));
        }
        self.conn.log.executed.push(sql.to_string());
        Ok(1)
    }

    fn commit(mut self) -> Result<()> {
        self.conn.log.commits += 1;
        if self.conn.script.fail_commit {
            return Err(DbError::Commit("disk I/O error".into()));
        }
        self.finish(TxState::Committed);
        Ok(())
    }

    fn rollback(mut self) -> Result<()> {
        self.conn.log.rollbacks += 1;
        if self.conn.script.fail_rollback {
            self.finish(TxState::RollbackFailed);
            return Err(DbError::Rollback("transaction handle is invalid".into()));
        }
        self.finish(TxState::RolledBack);
        Ok(())
    }
}

impl Drop for ScriptedTransaction<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.conn.log.tx_state = Some(TxState::Abandoned);
        }
    }
}
