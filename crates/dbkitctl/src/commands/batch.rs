//! Batch command implementation.

use anyhow::{Context, Result};
use dbkit::{BatchOptions, BatchOutcome, Database, RollbackStatus, SqliteConnection};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::OutputFormat;

#[derive(Serialize)]
struct BatchOutput {
    committed: bool,
    statements: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    failed_index: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    rollback_error: Option<String>,
}

/// Run the batch and print its outcome. Returns whether it committed.
pub fn run(
    db: &mut Database<SqliteConnection>,
    statements: Vec<String>,
    file: Option<PathBuf>,
    timeout_ms: Option<u64>,
    format: OutputFormat,
) -> Result<bool> {
    let statements = match file {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            parse_statements(&text)
        }
        None => statements,
    };

    let options = timeout_ms
        .map(|ms| BatchOptions::with_timeout(Duration::from_millis(ms)))
        .unwrap_or_default();

    let outcome = db
        .execute_batch_with(&statements, &options)
        .context("batch failed")?;

    let output = match &outcome {
        BatchOutcome::Committed { statements } => BatchOutput {
            committed: true,
            statements: *statements,
            failed_index: None,
            error: None,
            rollback_error: None,
        },
        BatchOutcome::RolledBack {
            failed_index,
            error,
            rollback,
        } => BatchOutput {
            committed: false,
            statements: statements.len(),
            failed_index: Some(*failed_index),
            error: Some(error.to_string()),
            rollback_error: match rollback {
                RollbackStatus::RolledBack => None,
                RollbackStatus::Failed(e) => Some(e.to_string()),
            },
        },
    };

    match format {
        OutputFormat::Text => {
            if output.committed {
                println!("Committed {} statement(s)", output.statements);
            } else {
                println!(
                    "Rolled back: statement {} of {} failed",
                    output.failed_index.unwrap_or_default() + 1,
                    output.statements
                );
                if let Some(error) = &output.error {
                    println!("  error: {}", error);
                }
                if let Some(error) = &output.rollback_error {
                    println!("  rollback also failed: {}", error);
                }
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(output.committed)
}

/// Split a statements file into statements: one per non-blank line, lines
/// starting with `--` ignored.
pub fn parse_statements(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with("--"))
        .map(String::from)
        .collect()
}
