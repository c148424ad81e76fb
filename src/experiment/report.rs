//! Rendering and persistence of experiment results.

use std::{fs, io::Write, path::Path};

use prettytable::{Cell, Row, Table};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One (method, n) cell of an experiment sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub n: usize,
    pub method: String,
    pub runs: usize,
    pub success: usize,
    pub success_rate: f64,
    pub avg_time_secs: f64,
}

/// Renders the rows as a human-readable table for terminal output.
pub fn render_summary_table(rows: &[ResultRow]) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Method"),
        Cell::new("N"),
        Cell::new("Runs"),
        Cell::new("Success"),
        Cell::new("Success Rate"),
        Cell::new("Avg Time (s)"),
    ]));

    for row in rows {
        table.add_row(Row::new(vec![
            Cell::new(&row.method),
            Cell::new(&row.n.to_string()),
            Cell::new(&row.runs.to_string()),
            Cell::new(&row.success.to_string()),
            Cell::new(&format!("{:.2}", row.success_rate)),
            Cell::new(&format!("{:.4}", row.avg_time_secs)),
        ]));
    }

    table.to_string()
}

/// Persists the rows as CSV, creating parent directories as needed. The
/// column order is stable so downstream plotting can rely on it.
pub fn write_csv(path: &Path, rows: &[ResultRow]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = fs::File::create(path)?;
    writeln!(file, "n,method,runs,success,success_rate,avg_time_secs")?;
    for row in rows {
        writeln!(
            file,
            "{},{},{},{},{},{:.6}",
            row.n, row.method, row.runs, row.success, row.success_rate, row.avg_time_secs
        )?;
    }
    Ok(())
}
