//! dbkitctl: Command-line interface for dbkit.
//!
//! Runs queries, single commands and all-or-nothing statement batches
//! against a SQLite database from the terminal.

mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use dbkit::config::Config;
use dbkit::observability::tracing::{init_tracing, LogFormat};
use dbkit::{Database, SqliteConnection};

/// Command-line interface for dbkit.
#[derive(Parser)]
#[command(name = "dbkitctl")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(flatten)]
    config: Config,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("unknown output format: {}", s)),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run a statement and print the rows it returns
    Query {
        /// SQL statement
        sql: String,
    },
    /// Run a statement that returns no rows
    Exec {
        /// SQL statement
        sql: String,
    },
    /// Run statements as one transaction; nothing applies unless all succeed
    Batch {
        /// Statements, executed in order
        statements: Vec<String>,
        /// Read statements from a file, one per line
        #[arg(short, long, conflicts_with = "statements")]
        file: Option<PathBuf>,
        /// Abort and roll back if the batch runs longer than this
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
    /// Read every row of a table
    Select {
        /// Table name
        table: String,
        /// Comma-separated columns to read (default: all)
        #[arg(short, long, value_delimiter = ',')]
        columns: Vec<String>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let log_format = match cli.output {
        OutputFormat::Text => LogFormat::Text,
        OutputFormat::Json => LogFormat::Json,
    };
    init_tracing(&cli.config.log_level, log_format);

    let mut db = Database::new(SqliteConnection::new(cli.config.sqlite_options()));

    match cli.command {
        Commands::Query { sql } => commands::query::run(&mut db, &sql, cli.output)?,
        Commands::Exec { sql } => commands::exec::run(&mut db, &sql, cli.output)?,
        Commands::Batch {
            statements,
            file,
            timeout_ms,
        } => {
            let committed =
                commands::batch::run(&mut db, statements, file, timeout_ms, cli.output)?;
            if !committed {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Select { table, columns } => {
            commands::select::run(&mut db, &table, &columns, cli.output)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}
