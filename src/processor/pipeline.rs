use super::{parse_csv_table, PipelineStep, ProgressReporter};
use crate::config::{AppConfig, SourceUrls};
use crate::database::{Database, CREDITS_TABLE, MOVIES_TABLE};
use crate::errors::AppResult;
use crate::fetch::SourceClient;
use crate::types::{JoinDiagnostics, PipelineStats, Table, COMBINED_COLUMNS};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// The join result narrowed to the combined columns
    pub cleaned: Table,
    pub stats: PipelineStats,
    pub database_path: PathBuf,
}

/// Loader/Joiner: fetch both sources, store them, join them, project
pub struct LoaderPipeline {
    urls: SourceUrls,
    database_path: PathBuf,
    client: SourceClient,
}

impl LoaderPipeline {
    /// Validate the configuration and build the HTTP client.
    /// Nothing is fetched here.
    pub fn new(config: &AppConfig) -> AppResult<Self> {
        let urls = config.source_urls()?;
        let client = SourceClient::new(&config.http)?;

        info!("Loader pipeline initialised");
        info!("Movies source: {}", urls.movies);
        info!("Credits source: {}", urls.credits);
        info!("Database: {}", config.database.path.display());

        Ok(Self {
            urls,
            database_path: config.database.path.clone(),
            client,
        })
    }

    /// Run every step once, in order. The first error ends the run.
    pub async fn run(&self) -> AppResult<PipelineOutcome> {
        let mut stats = PipelineStats::new();

        let movies_text = self.client.fetch_text(&self.urls.movies).await?;
        let credits_text = self.client.fetch_text(&self.urls.credits).await?;
        stats.movies_bytes = movies_text.len();
        stats.credits_bytes = credits_text.len();
        ProgressReporter::report_step(
            PipelineStep::Fetch,
            &format!(
                "Sources fetched ({} + {} bytes)",
                stats.movies_bytes, stats.credits_bytes
            ),
        );

        let movies = parse_csv_table(&movies_text)?;
        let credits = parse_csv_table(&credits_text)?;
        stats.movies_rows = movies.row_count();
        stats.credits_rows = credits.row_count();
        ProgressReporter::report_step(
            PipelineStep::Parse,
            &format!(
                "Sources loaded: {} movies, {} credits",
                stats.movies_rows, stats.credits_rows
            ),
        );

        let (combined, diagnostics) = store_and_join(&self.database_path, &movies, &credits)?;
        stats.diagnostics = diagnostics;
        ProgressReporter::report_step(
            PipelineStep::Join,
            &format!(
                "Database written to {} and tables joined ({} rows)",
                self.database_path.display(),
                combined.row_count()
            ),
        );

        let cleaned = combined.select(&COMBINED_COLUMNS)?;
        stats.combined_rows = cleaned.row_count();
        ProgressReporter::report_step(PipelineStep::Project, "Combined table cleaned");

        stats.timing.finish();
        ProgressReporter::report_completion(&stats);

        Ok(PipelineOutcome {
            cleaned,
            stats,
            database_path: self.database_path.clone(),
        })
    }
}

/// Write both tables to the store at `database_path` and join them
///
/// The connection lives only inside this call: it is closed before the
/// join result is returned and dropped on any error.
pub fn store_and_join(
    database_path: &Path,
    movies: &Table,
    credits: &Table,
) -> AppResult<(Table, JoinDiagnostics)> {
    let mut database = Database::open(database_path)?;

    database.replace_table(MOVIES_TABLE, movies)?;
    database.replace_table(CREDITS_TABLE, credits)?;
    ProgressReporter::report_step(
        PipelineStep::Store,
        &format!("Tables '{}' and '{}' replaced", MOVIES_TABLE, CREDITS_TABLE),
    );

    let diagnostics = database.join_diagnostics()?;
    log_diagnostics(&diagnostics);

    let combined = database.join_movies_credits()?;
    database.close()?;

    Ok((combined, diagnostics))
}

fn log_diagnostics(diagnostics: &JoinDiagnostics) {
    if diagnostics.duplicate_movie_titles > 0 {
        warn!(
            "{} titles occur more than once in '{}'; their joined rows are duplicated",
            diagnostics.duplicate_movie_titles, MOVIES_TABLE
        );
    }
    if diagnostics.duplicate_credit_titles > 0 {
        warn!(
            "{} titles occur more than once in '{}'; their joined rows are duplicated",
            diagnostics.duplicate_credit_titles, CREDITS_TABLE
        );
    }
    if diagnostics.unmatched_credits > 0 {
        warn!(
            "{} credit rows have no movie with the same title and are dropped",
            diagnostics.unmatched_credits
        );
    }
}
