//! Output rendering shared by commands.

use anyhow::Result;
use dbkit::Rows;

use crate::OutputFormat;

/// Print rows as an aligned table or as JSON.
pub fn print_rows(rows: &Rows, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => {
            if rows.columns.is_empty() {
                println!("No columns returned.");
            } else {
                print!("{}", render_table(rows));
                println!();
                println!("{} row(s)", rows.len());
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows)?);
        }
    }
    Ok(())
}

/// Render rows as a left-aligned table with a header rule.
pub fn render_table(rows: &Rows) -> String {
    let cells: Vec<Vec<String>> = rows
        .rows
        .iter()
        .map(|row| row.iter().map(ToString::to_string).collect())
        .collect();

    let mut widths: Vec<usize> = rows.columns.iter().map(String::len).collect();
    for row in &cells {
        for (idx, cell) in row.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx) {
                *width = (*width).max(cell.len());
            }
        }
    }

    let mut out = String::new();
    out.push_str(&format_line(&rows.columns, &widths));
    let rule_len = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    out.push_str(&"-".repeat(rule_len));
    out.push('\n');
    for row in &cells {
        out.push_str(&format_line(row, &widths));
    }
    out
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join("  ");
    format!("{}\n", line.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbkit::Value;

    #[test]
    fn test_render_table_aligns_columns() {
        let rows = Rows {
            columns: vec!["id".into(), "name".into()],
            rows: vec![
                vec![Value::Integer(1), Value::Text("alpha".into())],
                vec![Value::Integer(200), Value::Null],
            ],
        };

        assert_eq!(
            render_table(&rows),
            "id   name\n----------\n1    alpha\n200  NULL\n"
        );
    }
}
