//! Query command implementation.

use anyhow::{Context, Result};
use dbkit::{Database, SqliteConnection};

use crate::output::print_rows;
use crate::OutputFormat;

pub fn run(db: &mut Database<SqliteConnection>, sql: &str, format: OutputFormat) -> Result<()> {
    let rows = db.execute_query(sql).context("query failed")?;
    print_rows(&rows, format)
}
