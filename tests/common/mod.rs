//! Common Test Utilities
//!
//! Shared helpers for serving CSV sources from a mock HTTP server and
//! giving each test its own database path.

#![allow(dead_code)]

use movie_credits_loader::config::AppConfig;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const MOVIES_PATH: &str = "/tmdb_5000_movies.csv";
pub const CREDITS_PATH: &str = "/tmdb_5000_credits.csv";

/// Read a CSV fixture from tests/fixtures
pub fn fixture(name: &str) -> String {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("read fixture {}: {}", path.display(), e))
}

pub fn movies_csv() -> String {
    fixture("movies.csv")
}

pub fn credits_csv() -> String {
    fixture("credits.csv")
}

/// Serve `body` with status 200 at `route`
pub async fn mount_csv(server: &MockServer, route: &str, body: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

/// Answer `route` with an error status
pub async fn mount_status(server: &MockServer, route: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Mock server serving both fixtures
pub async fn sources_server() -> MockServer {
    let server = MockServer::start().await;
    mount_csv(&server, MOVIES_PATH, &movies_csv()).await;
    mount_csv(&server, CREDITS_PATH, &credits_csv()).await;
    server
}

pub fn movies_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), MOVIES_PATH)
}

pub fn credits_url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), CREDITS_PATH)
}

/// Temporary directory plus a database path inside it
pub struct TestWorkspace {
    pub dir: TempDir,
}

impl TestWorkspace {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    pub fn database_path(&self) -> PathBuf {
        self.dir.path().join("movies_database.db")
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    /// Configuration pointing at `server` and this workspace's database
    pub fn config_for(&self, server: &MockServer) -> AppConfig {
        let mut config = AppConfig::with_sources(movies_url(server), credits_url(server));
        config.database.path = self.database_path();
        config
    }
}
