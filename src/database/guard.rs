//! Scoped connection acquisition.
//!
//! [`ConnectionGuard`] opens a connection and closes it exactly once when the
//! guard goes out of scope, on every exit path including early returns and
//! panics.

use std::ops::{Deref, DerefMut};

use crate::database::connection::Connection;
use crate::error::{DbError, Result};

/// An open connection that is closed when the guard is dropped.
pub struct ConnectionGuard<'a, C: Connection> {
    conn: &'a mut C,
}

impl<'a, C: Connection> ConnectionGuard<'a, C> {
    /// Open `conn` for the lifetime of the guard.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::AlreadyOpen`] without touching a connection that is
    /// already open. If opening fails, the connection is closed (closing is
    /// idempotent) and the open error is returned.
    pub fn open(conn: &'a mut C) -> Result<Self> {
        if conn.is_open() {
            return Err(DbError::AlreadyOpen);
        }
        if let Err(e) = conn.open() {
            tracing::error!(error = %e, "Failed to open connection");
            conn.close();
            return Err(e);
        }
        Ok(Self { conn })
    }
}

impl<C: Connection> Deref for ConnectionGuard<'_, C> {
    type Target = C;

    fn deref(&self) -> &C {
        self.conn
    }
}

impl<C: Connection> DerefMut for ConnectionGuard<'_, C> {
    fn deref_mut(&mut self) -> &mut C {
        self.conn
    }
}

impl<C: Connection> Drop for ConnectionGuard<'_, C> {
    fn drop(&mut self) {
        self.conn.close();
    }
}
