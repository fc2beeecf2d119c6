//! Query helper utilities for common database patterns
//!
//! - Row counting and single COUNT(*) queries
//! - Reading an arbitrary result set back into a [`Table`]

use crate::database::schema::quote_identifier;
use crate::errors::AppResult;
use crate::types::{Cell, Table};
use rusqlite::Connection;

/// Helper trait for common database query patterns
///
/// Implemented for `rusqlite::Connection` (and usable from a
/// `rusqlite::Transaction` through deref).
pub trait QueryHelper {
    /// Number of rows in a table
    fn count_rows(&self, table: &str) -> AppResult<usize>;

    /// Run a query returning a single COUNT(*) value
    fn query_count(&self, sql: &str) -> AppResult<usize>;

    /// Run a query and collect every row, keeping the result column names
    fn query_table(&self, sql: &str) -> AppResult<Table>;
}

impl QueryHelper for Connection {
    fn count_rows(&self, table: &str) -> AppResult<usize> {
        self.query_count(&format!("SELECT COUNT(*) FROM {}", quote_identifier(table)))
    }

    fn query_count(&self, sql: &str) -> AppResult<usize> {
        let count: i64 = self.query_row(sql, [], |row| row.get(0))?;
        Ok(count.max(0) as usize)
    }

    fn query_table(&self, sql: &str) -> AppResult<Table> {
        let mut stmt = self.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(str::to_string).collect();
        let width = columns.len();

        let rows = stmt
            .query_map([], |row| {
                (0..width)
                    .map(|i| row.get::<_, Cell>(i))
                    .collect::<rusqlite::Result<Vec<_>>>()
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Table::from_rows(columns, rows)
    }
}
