//! Configuration parsing for dbkit.
//!
//! Supports:
//! - CLI arguments via clap
//! - Environment variable overrides
//! - Sensible defaults for quick start

use clap::Args;
use std::path::PathBuf;
use std::time::Duration;

use crate::database::SqliteOptions;

/// Connection and runtime settings shared by dbkit front ends.
///
/// Flattened into a front end's own clap parser.
#[derive(Args, Debug, Clone)]
pub struct Config {
    /// Path to the SQLite database file (":memory:" for a throwaway database)
    #[arg(short, long, env = "DBKIT_DATABASE", default_value = "./dbkit.db")]
    pub database: PathBuf,

    /// How long to wait on a locked database before failing, in milliseconds
    #[arg(long, env = "DBKIT_BUSY_TIMEOUT_MS", default_value_t = 5000)]
    pub busy_timeout_ms: u64,

    /// Do not enforce foreign key constraints
    #[arg(long, env = "DBKIT_NO_FOREIGN_KEYS")]
    pub no_foreign_keys: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,
}

impl Config {
    /// SQLite connection options described by this configuration.
    pub fn sqlite_options(&self) -> SqliteOptions {
        let base = if self.database.as_os_str() == ":memory:" {
            SqliteOptions::in_memory()
        } else {
            SqliteOptions::file(&self.database)
        };
        base.busy_timeout(Duration::from_millis(self.busy_timeout_ms))
            .foreign_keys(!self.no_foreign_keys)
    }

    /// Create a configuration for testing.
    #[cfg(test)]
    pub fn test_config(database: PathBuf) -> Self {
        Self {
            database,
            busy_timeout_ms: 100,
            no_foreign_keys: false,
            log_level: "debug".into(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: PathBuf::from("./dbkit.db"),
            busy_timeout_ms: 5000,
            no_foreign_keys: false,
            log_level: "warn".into(),
        }
    }
}
