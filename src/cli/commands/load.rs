use crate::config::{AppConfig, CREDITS_URL_ENV, MOVIES_URL_ENV};
use crate::errors::{AppError, AppResult};
use crate::output::{export_table, format_preview, ExportFormat};
use crate::processor::{LoaderPipeline, PipelineOutcome, ProgressReporter};
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Args, Debug, Default, Clone)]
pub struct LoadCommand {
    /// Path to a .env file with the source URLs (defaults to ./.env if present)
    #[arg(long)]
    pub env_file: Option<PathBuf>,

    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    pub database_path: Option<PathBuf>,

    /// Rows of the cleaned table to print (overrides config.toml)
    #[arg(long)]
    pub preview_rows: Option<usize>,

    /// Write the full cleaned table to this file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Export format for --output: csv or json (default: from the file extension)
    #[arg(long)]
    pub format: Option<String>,

    /// HTTP timeout per source in seconds (overrides config.toml)
    #[arg(long)]
    pub timeout_seconds: Option<u64>,
}

impl LoadCommand {
    pub async fn run(&self) -> AppResult<()> {
        self.execute().await.map(|_| ())
    }

    /// Load configuration, run the pipeline, print and export the result
    ///
    /// Configuration problems are reported before any source is fetched.
    pub async fn execute(&self) -> AppResult<PipelineOutcome> {
        info!("=== Movie/Credits Loader ===");

        load_env_file(self.env_file.as_deref())?;

        let mut app_config = match AppConfig::load() {
            Ok(config) => {
                info!("Configuration loaded successfully");
                config
            }
            Err(e) => {
                warn!("Failed to load configuration: {}", e);
                return Err(e.into());
            }
        };

        // CLI arguments override config values
        if let Some(path) = &self.database_path {
            app_config.database.path = path.clone();
        }
        if let Some(rows) = self.preview_rows {
            app_config.output.preview_rows = rows;
        }
        if let Some(timeout) = self.timeout_seconds {
            app_config.http.timeout_seconds = timeout;
        }
        app_config.validate()?;

        let export = self.export_target()?;

        info!("Configuration:");
        info!("  {}: {:?}", MOVIES_URL_ENV, app_config.sources.movies_url);
        info!("  {}: {:?}", CREDITS_URL_ENV, app_config.sources.credits_url);
        info!("  Database: {}", app_config.database.path.display());
        info!("  Timeout: {}s", app_config.http.timeout_seconds);

        let pipeline = LoaderPipeline::new(&app_config)?;
        let outcome = pipeline.run().await?;

        println!();
        print!(
            "{}",
            format_preview(&outcome.cleaned, app_config.output.preview_rows)
        );

        if let Some((path, format)) = export {
            let written = export_table(&outcome.cleaned, &path, format)?;
            println!("Cleaned table ({} rows) written to: {}", written, path.display());
        }

        println!(
            "\n{} | elapsed {}",
            outcome.stats.summary(),
            ProgressReporter::format_elapsed_time(outcome.stats.timing.elapsed().as_secs_f64())
        );

        Ok(outcome)
    }

    fn export_target(&self) -> AppResult<Option<(PathBuf, ExportFormat)>> {
        let Some(path) = &self.output else {
            if self.format.is_some() {
                warn!("--format has no effect without --output");
            }
            return Ok(None);
        };

        let format = match &self.format {
            Some(name) => ExportFormat::parse(name)?,
            None => ExportFormat::from_path(path),
        };
        Ok(Some((path.clone(), format)))
    }
}

/// Read variables from a .env file into the process environment
///
/// An explicit path must exist. Without one, `./.env` is used when present;
/// its absence is fine since the variables may already be set.
fn load_env_file(path: Option<&Path>) -> AppResult<()> {
    match path {
        Some(path) => {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    ".env file does not exist: {}",
                    path.display()
                )));
            }
            dotenv::from_path(path)
                .map_err(|e| AppError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
            info!(".env file loaded: {}", path.display());
        }
        None => match dotenv::dotenv() {
            Ok(found) => info!(".env file loaded: {}", found.display()),
            Err(_) => info!("No .env file found, using process environment"),
        },
    }
    Ok(())
}
