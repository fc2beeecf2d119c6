//! In-memory tabular data shared by every pipeline step
//!
//! A parsed CSV source, the stored tables and the join result are all
//! represented as a [`Table`]: ordered column names plus rows of [`Cell`]s.

use crate::errors::{AppError, AppResult};
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use serde::{Serialize, Serializer};
use std::fmt;

/// A single value in a table
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Text rendering of the value, `None` for null
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Null => None,
            Cell::Text(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Integer(v) => write!(f, "{}", v),
            Cell::Real(v) if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e16 => {
                write!(f, "{:.1}", v)
            }
            Cell::Real(v) => write!(f, "{}", v),
            Cell::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Integer(value)
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Null => serializer.serialize_none(),
            Cell::Integer(v) => serializer.serialize_i64(*v),
            Cell::Real(v) => serializer.serialize_f64(*v),
            Cell::Text(s) => serializer.serialize_str(s),
        }
    }
}

impl ToSql for Cell {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Cell::Null => ToSqlOutput::Owned(Value::Null),
            Cell::Integer(v) => ToSqlOutput::Owned(Value::Integer(*v)),
            Cell::Real(v) => ToSqlOutput::Owned(Value::Real(*v)),
            Cell::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
        })
    }
}

impl FromSql for Cell {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(match value {
            ValueRef::Null => Cell::Null,
            ValueRef::Integer(v) => Cell::Integer(v),
            ValueRef::Real(v) => Cell::Real(v),
            ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
                Cell::Text(String::from_utf8_lossy(bytes).into_owned())
            }
        })
    }
}

/// Storage type chosen for a column from its values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Real,
    Text,
}

impl ColumnType {
    pub fn sql_name(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Real => "REAL",
            ColumnType::Text => "TEXT",
        }
    }

    /// Narrowest type that holds every non-null value.
    /// A column with no values at all is `Text`.
    pub fn infer<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Cell>,
    {
        let mut seen_value = false;
        let mut all_integer = true;
        let mut all_real = true;

        for cell in values {
            match cell {
                Cell::Null => continue,
                Cell::Integer(_) => {}
                Cell::Real(_) => all_integer = false,
                Cell::Text(s) => {
                    let trimmed = s.trim();
                    if trimmed.parse::<i64>().is_err() {
                        all_integer = false;
                        if trimmed.parse::<f64>().is_err() {
                            all_real = false;
                        }
                    }
                }
            }
            seen_value = true;
            if !all_integer && !all_real {
                break;
            }
        }

        match (seen_value, all_integer, all_real) {
            (false, _, _) => ColumnType::Text,
            (true, true, _) => ColumnType::Integer,
            (true, false, true) => ColumnType::Real,
            _ => ColumnType::Text,
        }
    }

    /// Convert a cell into this column's representation
    pub fn coerce(&self, cell: &Cell) -> Cell {
        match (self, cell) {
            (_, Cell::Null) => Cell::Null,
            (ColumnType::Integer, Cell::Text(s)) => s
                .trim()
                .parse::<i64>()
                .map(Cell::Integer)
                .unwrap_or_else(|_| cell.clone()),
            (ColumnType::Real, Cell::Text(s)) => s
                .trim()
                .parse::<f64>()
                .map(Cell::Real)
                .unwrap_or_else(|_| cell.clone()),
            (ColumnType::Real, Cell::Integer(v)) => Cell::Real(*v as f64),
            (ColumnType::Text, Cell::Integer(_)) | (ColumnType::Text, Cell::Real(_)) => {
                Cell::Text(cell.to_string())
            }
            _ => cell.clone(),
        }
    }
}

/// Ordered columns and rows of cells
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table, rejecting rows whose width differs from the header
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<Cell>>) -> AppResult<Self> {
        let mut table = Self::new(columns);
        for row in rows {
            table.push_row(row)?;
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<Cell>) -> AppResult<()> {
        if row.len() != self.columns.len() {
            return Err(AppError::InvalidData(format!(
                "row {} has {} values but the table has {} columns",
                self.rows.len() + 1,
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate over the cells of one column
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &Cell> {
        self.rows.iter().map(move |row| &row[index])
    }

    /// Storage type for every column, in column order
    pub fn infer_column_types(&self) -> Vec<ColumnType> {
        (0..self.columns.len())
            .map(|i| ColumnType::infer(self.column_values(i)))
            .collect()
    }

    /// Keep only the named columns, in the given order
    pub fn select(&self, columns: &[&str]) -> AppResult<Table> {
        let indices = columns
            .iter()
            .map(|name| {
                self.column_index(name).ok_or_else(|| AppError::MissingColumn {
                    column: (*name).to_string(),
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let rows: Vec<Vec<Cell>> = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
            .collect();

        Ok(Table {
            columns: columns.iter().map(|c| (*c).to_string()).collect(),
            rows,
        })
    }

    /// First `n` rows as a new table
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }
}
