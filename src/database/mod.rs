//! SQLite store for the movie and credit sources.
//!
//! The `Database` struct owns one connection for the length of a run:
//! both sources are written as full tables (replacing whatever a previous
//! run left behind), joined with a fixed query, and the connection is
//! closed before the result is handed on.

pub mod query_helper;
pub mod schema;

pub use query_helper::QueryHelper;
pub use schema::{CREDITS_TABLE, MOVIES_TABLE};

use crate::errors::{AppError, AppResult};
use crate::types::{Cell, JoinDiagnostics, Table};
use rusqlite::{params_from_iter, Connection};
use std::path::Path;
use tracing::{debug, info};

/// Join of the two sources on exact title equality.
/// `cast` is an SQL keyword, hence the quoting.
pub const JOIN_QUERY: &str = r#"
    SELECT m.movie_id, m.title, m.overview, m.genres, m.keywords, c."cast", c.crew
    FROM movies m
    JOIN credits c ON m.title = c.title;
"#;

const DUPLICATE_MOVIE_TITLES_QUERY: &str = "SELECT COUNT(*) FROM (
    SELECT title FROM movies WHERE title IS NOT NULL GROUP BY title HAVING COUNT(*) > 1
)";

const DUPLICATE_CREDIT_TITLES_QUERY: &str = "SELECT COUNT(*) FROM (
    SELECT title FROM credits WHERE title IS NOT NULL GROUP BY title HAVING COUNT(*) > 1
)";

const UNMATCHED_CREDITS_QUERY: &str = "SELECT COUNT(*) FROM credits c
    WHERE NOT EXISTS (SELECT 1 FROM movies m WHERE m.title = c.title)";

/// The main database interface
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Open (or create) the database file
    pub fn open<P: AsRef<Path>>(database_path: P) -> AppResult<Self> {
        let path = database_path.as_ref();
        let connection = Connection::open(path)?;

        info!("Database opened at: {}", path.display());
        Ok(Self { connection })
    }

    /// In-memory database, used by tests
    pub fn open_in_memory() -> AppResult<Self> {
        Ok(Self {
            connection: Connection::open_in_memory()?,
        })
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Execute a function within a database transaction
    pub fn execute_transaction<F, R>(&mut self, f: F) -> AppResult<R>
    where
        F: FnOnce(&rusqlite::Transaction) -> AppResult<R>,
    {
        let tx = self.connection.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }

    /// Replace `name` with the contents of `table`
    ///
    /// Any existing table of that name is dropped first, so repeated runs
    /// never accumulate rows. Column storage types are inferred from the
    /// values. Returns the number of rows written.
    pub fn replace_table(&mut self, name: &str, table: &Table) -> AppResult<usize> {
        if table.columns().is_empty() {
            return Err(AppError::InvalidData(format!(
                "cannot store table '{}' without columns",
                name
            )));
        }

        let types = table.infer_column_types();
        let create_sql = schema::create_table_sql(name, table.columns(), &types);
        let insert_sql = schema::insert_sql(name, table.columns());

        let written = self.execute_transaction(|tx| {
            tx.execute_batch(&schema::drop_table_sql(name))?;
            tx.execute_batch(&create_sql)?;

            let mut stmt = tx.prepare(&insert_sql)?;
            for row in table.rows() {
                let values: Vec<Cell> = row
                    .iter()
                    .zip(&types)
                    .map(|(cell, column_type)| column_type.coerce(cell))
                    .collect();
                stmt.execute(params_from_iter(values.iter()))?;
            }
            Ok(table.row_count())
        })?;

        debug!("{} columns: {:?}", name, types);
        info!("Replaced table '{}' with {} rows", name, written);
        Ok(written)
    }

    /// Run the fixed movies/credits join
    pub fn join_movies_credits(&self) -> AppResult<Table> {
        let combined = self.connection.query_table(JOIN_QUERY)?;
        info!("Join produced {} rows", combined.row_count());
        Ok(combined)
    }

    /// Counts that explain dropped or duplicated join rows
    pub fn join_diagnostics(&self) -> AppResult<JoinDiagnostics> {
        Ok(JoinDiagnostics {
            duplicate_movie_titles: self.connection.query_count(DUPLICATE_MOVIE_TITLES_QUERY)?,
            duplicate_credit_titles: self.connection.query_count(DUPLICATE_CREDIT_TITLES_QUERY)?,
            unmatched_credits: self.connection.query_count(UNMATCHED_CREDITS_QUERY)?,
        })
    }

    pub fn table_row_count(&self, name: &str) -> AppResult<usize> {
        self.connection.count_rows(name)
    }

    /// Close the connection, surfacing any error SQLite reports on close
    pub fn close(self) -> AppResult<()> {
        self.connection
            .close()
            .map_err(|(_, e)| AppError::Database(e))
    }
}
