//! dbkit: a small relational database access layer.
//!
//! dbkit runs ad-hoc queries, single commands and all-or-nothing statement
//! batches against a connection it opens and closes on every call.
//!
//! # Architecture
//!
//! - **Explicit connections**: every operation receives the connection it works on
//! - **Atomic batches**: a batch either commits every statement or none of them
//! - **Scoped cleanup**: connections are closed on every exit path
//! - **Observable**: structured `tracing` events for every batch
//!
//! # Modules
//!
//! - [`config`]: CLI and environment configuration
//! - [`database`]: connection capability, batch executor and helpers
//! - [`error`]: error taxonomy
//! - [`observability`]: tracing setup
//! - [`serial`]: versioned object persistence

// Lint configuration
#![warn(clippy::all)]
#![allow(
    clippy::module_name_repetitions,    // database::Database is fine
    clippy::must_use_candidate,         // Not all functions need #[must_use]
    clippy::missing_errors_doc,         // Error docs can be verbose
    clippy::missing_panics_doc,         // Panic docs can be verbose
    clippy::needless_raw_string_hashes  // r#""# is fine for SQL
)]

pub mod config;
pub mod database;
pub mod error;
pub mod observability;
pub mod serial;

pub use database::{
    execute_batch, execute_batch_with, projection_query, BatchOptions, BatchOutcome, Connection,
    Database, RollbackStatus, Rows, SqliteConnection, SqliteOptions, Transaction, Value,
};
pub use error::{DbError, Result};
