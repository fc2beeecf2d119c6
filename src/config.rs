use config::{Config, ConfigError, File};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Environment variable holding the movies CSV location
pub const MOVIES_URL_ENV: &str = "DATABASE_URL_1";

/// Environment variable holding the credits CSV location
pub const CREDITS_URL_ENV: &str = "DATABASE_URL_2";

/// SQLite file written by every run
pub const DEFAULT_DATABASE_PATH: &str = "movies_database.db";

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
pub const DEFAULT_PREVIEW_ROWS: usize = 5;
pub const DEFAULT_USER_AGENT: &str = concat!("movie-credits-loader/", env!("CARGO_PKG_VERSION"));

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub sources: SourcesConfig,
    pub database: DatabaseConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Remote CSV locations. Both are required; see [`AppConfig::source_urls`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub movies_url: Option<String>,
    pub credits_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub preview_rows: usize,
}

/// Validated pair of source locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrls {
    pub movies: Url,
    pub credits: Url,
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    ///
    /// Fails when either source URL is missing, so callers can stop before
    /// any network activity.
    pub fn load() -> Result<Self, ConfigError> {
        let http_defaults = HttpConfig::default();
        let config = Config::builder()
            .set_default("database.path", DEFAULT_DATABASE_PATH)?
            .set_default("http.timeout_seconds", http_defaults.timeout_seconds)?
            .set_default("http.user_agent", http_defaults.user_agent)?
            .set_default("output.preview_rows", DEFAULT_PREVIEW_ROWS as i64)?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // MOVIE_LOADER_DATABASE__PATH, MOVIE_LOADER_HTTP__TIMEOUT_SECONDS, ...
            .add_source(
                config::Environment::with_prefix("MOVIE_LOADER")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // The two source variables keep their fixed, unprefixed names
        if let Ok(url) = env::var(MOVIES_URL_ENV) {
            app_config.sources.movies_url = Some(url);
        }
        if let Ok(url) = env::var(CREDITS_URL_ENV) {
            app_config.sources.credits_url = Some(url);
        }

        app_config.validate()?;
        Ok(app_config)
    }

    /// Build a configuration for explicit source locations, all else default
    pub fn with_sources(movies_url: impl Into<String>, credits_url: impl Into<String>) -> Self {
        Self {
            sources: SourcesConfig {
                movies_url: Some(movies_url.into()),
                credits_url: Some(credits_url.into()),
            },
            database: DatabaseConfig {
                path: PathBuf::from(DEFAULT_DATABASE_PATH),
            },
            http: HttpConfig::default(),
            output: OutputConfig {
                preview_rows: DEFAULT_PREVIEW_ROWS,
            },
        }
    }

    /// Check everything a run needs before it starts
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.source_urls()?;
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Message(
                "http.timeout_seconds must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Return both source URLs, or a message naming the missing variables
    pub fn source_urls(&self) -> Result<SourceUrls, ConfigError> {
        let movies = non_blank(&self.sources.movies_url);
        let credits = non_blank(&self.sources.credits_url);

        let (movies, credits) = match (movies, credits) {
            (Some(movies), Some(credits)) => (movies, credits),
            (movies, credits) => {
                let mut missing = Vec::new();
                if movies.is_none() {
                    missing.push(MOVIES_URL_ENV);
                }
                if credits.is_none() {
                    missing.push(CREDITS_URL_ENV);
                }
                return Err(ConfigError::Message(format!(
                    "Source URLs not configured: {}. Set them in the environment or a .env file",
                    missing.join(", ")
                )));
            }
        };

        Ok(SourceUrls {
            movies: parse_url(MOVIES_URL_ENV, movies)?,
            credits: parse_url(CREDITS_URL_ENV, credits)?,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_url(name: &str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value)
        .map_err(|e| ConfigError::Message(format!("{} is not a valid URL ({}): {}", name, value, e)))
}
