use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Database operations
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Fetching the remote CSV sources
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing and export
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON export
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Projection onto a column the table does not have
    #[error("Missing column: {column}")]
    MissingColumn { column: String },
}

/// Source fetch error types
#[derive(Error, Debug)]
pub enum FetchError {
    /// The underlying HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),

    /// Request never produced a response (DNS, connect, timeout, ...)
    #[error("Request failed: {url} - {message}")]
    RequestFailed { url: String, message: String },

    /// Server answered with a 4xx/5xx status
    #[error("HTTP {status} from {url}")]
    BadStatus { url: String, status: u16 },

    /// Response arrived but the body could not be read as text
    #[error("Failed to read body from {url}: {message}")]
    BodyReadFailed { url: String, message: String },
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

/// Result type for source fetches
pub type FetchResult<T> = Result<T, FetchError>;

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

impl AppError {
    /// True when the error was raised before any source was contacted
    pub fn is_config(&self) -> bool {
        matches!(self, AppError::Config(_))
    }
}
