//! Exec command implementation.

use anyhow::{Context, Result};
use dbkit::{Database, SqliteConnection};
use serde::Serialize;

use crate::OutputFormat;

#[derive(Serialize)]
struct ExecOutput {
    affected_rows: usize,
}

pub fn run(db: &mut Database<SqliteConnection>, sql: &str, format: OutputFormat) -> Result<()> {
    let affected_rows = db.execute_command(sql).context("command failed")?;

    match format {
        OutputFormat::Text => println!("{} row(s) affected", affected_rows),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&ExecOutput { affected_rows })?
            );
        }
    }
    Ok(())
}
