//! Select command implementation.

use anyhow::{Context, Result};
use dbkit::{Database, SqliteConnection};

use crate::output::print_rows;
use crate::OutputFormat;

pub fn run(
    db: &mut Database<SqliteConnection>,
    table: &str,
    columns: &[String],
    format: OutputFormat,
) -> Result<()> {
    let rows = db
        .select(table, columns)
        .with_context(|| format!("failed to read table {table}"))?;
    print_rows(&rows, format)
}
