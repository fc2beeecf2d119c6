//! Rendering and export of the cleaned table
//!
//! The console preview mirrors a dataframe `head()`: a row index followed
//! by every column, with long cells cut down to a fixed width.

use crate::errors::{AppError, AppResult};
use crate::types::{CombinedRecord, Table};
use serde_json::Value;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Widest a preview cell is allowed to get, in characters
pub const PREVIEW_CELL_WIDTH: usize = 24;

/// File formats for exporting the cleaned table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// Parse an explicit format name
    pub fn parse(name: &str) -> AppResult<Self> {
        match name.to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(AppError::Config(format!(
                "Unknown output format '{}' (expected csv or json)",
                other
            ))),
        }
    }

    /// Guess the format from a file extension, defaulting to CSV
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .as_deref()
        {
            Some("json") => ExportFormat::Json,
            _ => ExportFormat::Csv,
        }
    }
}

/// Cut a cell to `width` characters for display, flattening newlines
pub fn truncate_cell(value: &str, width: usize) -> String {
    let flat: String = value
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();

    if flat.chars().count() <= width {
        flat
    } else {
        let keep = width.saturating_sub(3);
        format!("{}...", flat.chars().take(keep).collect::<String>())
    }
}

/// Text table of the first `rows` rows
pub fn format_preview(table: &Table, rows: usize) -> String {
    let head = table.head(rows);

    let mut grid: Vec<Vec<String>> = Vec::with_capacity(head.row_count() + 1);
    let mut header = vec![String::new()];
    header.extend(
        head.columns()
            .iter()
            .map(|c| truncate_cell(c, PREVIEW_CELL_WIDTH)),
    );
    grid.push(header);

    for (index, row) in head.rows().iter().enumerate() {
        let mut line = vec![index.to_string()];
        line.extend(
            row.iter().map(|cell| {
                truncate_cell(
                    &cell.as_text().unwrap_or_else(|| "None".to_string()),
                    PREVIEW_CELL_WIDTH,
                )
            }),
        );
        grid.push(line);
    }

    let widths: Vec<usize> = (0..grid[0].len())
        .map(|col| {
            grid.iter()
                .map(|line| line[col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for line in &grid {
        let rendered = line
            .iter()
            .zip(&widths)
            .map(|(value, width)| format!("{:<width$}", value, width = *width))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(rendered.trim_end());
        out.push('\n');
    }

    if table.row_count() > head.row_count() {
        out.push_str(&format!(
            "[{} of {} rows shown]\n",
            head.row_count(),
            table.row_count()
        ));
    }
    out
}

/// Write the whole table to `path`; returns the number of rows written
pub fn export_table(table: &Table, path: &Path, format: ExportFormat) -> AppResult<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    match format {
        ExportFormat::Csv => write_csv(table, path)?,
        ExportFormat::Json => write_json(table, path)?,
    }
    Ok(table.row_count())
}

fn write_csv(table: &Table, path: &Path) -> AppResult<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.columns())?;
    for row in table.rows() {
        writer.write_record(row.iter().map(|cell| cell.to_string()))?;
    }
    writer.flush()?;
    Ok(())
}

fn write_json(table: &Table, path: &Path) -> AppResult<()> {
    let records = CombinedRecord::from_table(table)?;
    let values: Vec<Value> = records.iter().map(CombinedRecord::to_json).collect();

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, &values)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
