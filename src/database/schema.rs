//! Table definitions derived from parsed sources
//!
//! Stored tables mirror their CSV source column-for-column; only the
//! storage type of each column is chosen here.

use crate::types::ColumnType;

/// Source table holding the movies CSV
pub const MOVIES_TABLE: &str = "movies";

/// Source table holding the credits CSV
pub const CREDITS_TABLE: &str = "credits";

/// Quote an identifier for SQLite (embedded quotes are doubled)
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

pub fn drop_table_sql(table: &str) -> String {
    format!("DROP TABLE IF EXISTS {};", quote_identifier(table))
}

/// CREATE TABLE statement with one typed column per source column
pub fn create_table_sql(table: &str, columns: &[String], types: &[ColumnType]) -> String {
    let definitions = columns
        .iter()
        .zip(types)
        .map(|(name, column_type)| format!("{} {}", quote_identifier(name), column_type.sql_name()))
        .collect::<Vec<_>>()
        .join(", ");

    format!("CREATE TABLE {} ({});", quote_identifier(table), definitions)
}

/// INSERT statement with positional parameters for every column
pub fn insert_sql(table: &str, columns: &[String]) -> String {
    let names = columns
        .iter()
        .map(|c| quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ");
    let placeholders = (1..=columns.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        quote_identifier(table),
        names,
        placeholders
    )
}
