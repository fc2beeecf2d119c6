use crate::errors::{AppError, AppResult};
use crate::types::{Cell, ColumnType, Table};
use csv::ReaderBuilder;
use std::collections::HashMap;
use tracing::{debug, info};

/// Field values read as missing, in addition to the empty field
pub const MISSING_VALUE_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN", "<NA>",
    "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Parse CSV text (header row first) into a typed [`Table`]
///
/// - every source column is kept
/// - empty fields and [`MISSING_VALUE_TOKENS`] become [`Cell::Null`]
/// - each column is converted to the narrowest type holding all its values
/// - records shorter than the header are padded with nulls; longer ones fail
pub fn parse_csv_table(text: &str) -> AppResult<Table> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = csv_reader.headers().map_err(AppError::Csv)?.clone();
    if headers.is_empty() {
        return Err(AppError::InvalidData(
            "source has no header row".to_string(),
        ));
    }

    let columns = normalise_headers(headers.iter());
    let width = columns.len();
    let mut table = Table::new(columns);

    for (index, result) in csv_reader.records().enumerate() {
        let record = result.map_err(AppError::Csv)?;
        if record.len() > width {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(AppError::InvalidData(format!(
                "record {} (line {}) has {} fields but the header has {}",
                index + 1,
                line,
                record.len(),
                width
            )));
        }

        let mut row: Vec<Cell> = record.iter().map(field_cell).collect();
        if row.len() < width {
            debug!(
                "Record {} has {} of {} fields, padding with nulls",
                index + 1,
                row.len(),
                width
            );
            row.resize(width, Cell::Null);
        }
        table.push_row(row)?;
    }

    let typed = apply_column_types(&table)?;
    info!(
        "Parsed CSV source: {} columns, {} rows",
        typed.columns().len(),
        typed.row_count()
    );
    Ok(typed)
}

fn field_cell(field: &str) -> Cell {
    if field.is_empty() || MISSING_VALUE_TOKENS.iter().any(|token| *token == field) {
        Cell::Null
    } else {
        Cell::Text(field.to_string())
    }
}

/// Make header names usable as unique column names
///
/// Empty names become `Unnamed: <position>`; repeats of a name get
/// `.1`, `.2`, ... appended in order of appearance.
pub fn normalise_headers<'a, I>(headers: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut columns: Vec<String> = Vec::new();

    for (position, raw) in headers.into_iter().enumerate() {
        let base = if raw.is_empty() {
            format!("Unnamed: {}", position)
        } else {
            raw.to_string()
        };

        let mut name = base.clone();
        while columns.contains(&name) {
            let counter = seen.entry(base.clone()).or_insert(0);
            *counter += 1;
            name = format!("{}.{}", base, counter);
        }
        if name != base {
            debug!("Renamed duplicate column '{}' to '{}'", base, name);
        }
        columns.push(name);
    }

    columns
}

fn apply_column_types(table: &Table) -> AppResult<Table> {
    let types = table.infer_column_types();
    if types.iter().any(|t| *t != ColumnType::Text) {
        debug!("Inferred column types: {:?}", types);
    }

    let rows: Vec<Vec<Cell>> = table
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .zip(&types)
                .map(|(cell, column_type)| column_type.coerce(cell))
                .collect()
        })
        .collect();

    Table::from_rows(table.columns().to_vec(), rows)
}
