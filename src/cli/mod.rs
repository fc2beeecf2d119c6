use crate::errors::AppResult;
use clap::Parser;

pub mod commands;

/// Movie/Credits Loader
///
/// Fetches the movies and credits CSV sources named by DATABASE_URL_1 and
/// DATABASE_URL_2, stores them in SQLite, joins them on title and prints
/// the cleaned table.
#[derive(Parser)]
#[command(name = "movie-credits-loader")]
#[command(about = "Fetch movie and credit CSV sources, store them in SQLite and join them on title")]
#[command(version)]
pub struct Cli {
    #[command(flatten)]
    pub load: commands::load::LoadCommand,
}

pub async fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();
    cli.load.run().await
}
