//! Load command tests
//!
//! These drive `LoadCommand` the way the binary does, including `.env`
//! handling, so they touch process environment variables and run serially.

use anyhow::Result;
use movie_credits_loader::cli::commands::load::LoadCommand;
use movie_credits_loader::config::{CREDITS_URL_ENV, MOVIES_URL_ENV};
use serde_json::Value;
use serial_test::serial;
use std::env;
use wiremock::MockServer;

use crate::common::{credits_url, movies_url, sources_server, TestWorkspace};

fn clear_source_env() {
    env::remove_var(MOVIES_URL_ENV);
    env::remove_var(CREDITS_URL_ENV);
}

#[tokio::test]
#[serial]
async fn test_missing_source_url_stops_before_any_request() -> Result<()> {
    clear_source_env();
    let server = sources_server().await;
    let workspace = TestWorkspace::new();

    let env_file = workspace.path(".env");
    std::fs::write(&env_file, format!("{}={}\n", MOVIES_URL_ENV, movies_url(&server)))?;

    let command = LoadCommand {
        env_file: Some(env_file),
        database_path: Some(workspace.database_path()),
        ..Default::default()
    };
    let err = command.execute().await.unwrap_err();
    clear_source_env();

    assert!(err.is_config());
    let message = err.to_string();
    assert!(message.contains(CREDITS_URL_ENV), "{}", message);
    assert!(!message.contains(MOVIES_URL_ENV), "{}", message);
    assert_eq!(message.matches(".env file").count(), 1, "{}", message);
    let requests = server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty(), "no source should be fetched");
    assert!(!workspace.database_path().exists());
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_invalid_setting_is_reported_without_url_hint() -> Result<()> {
    clear_source_env();
    let server = sources_server().await;
    let workspace = TestWorkspace::new();

    env::set_var(MOVIES_URL_ENV, movies_url(&server));
    env::set_var(CREDITS_URL_ENV, credits_url(&server));
    env::set_var("MOVIE_LOADER_HTTP__TIMEOUT_SECONDS", "soon");
    let empty_env = workspace.path("empty.env");
    std::fs::write(&empty_env, "")?;

    let command = LoadCommand {
        env_file: Some(empty_env),
        database_path: Some(workspace.database_path()),
        ..Default::default()
    };
    let result = command.execute().await;
    env::remove_var("MOVIE_LOADER_HTTP__TIMEOUT_SECONDS");
    clear_source_env();

    let err = result.unwrap_err();
    assert!(err.is_config());
    let message = err.to_string();
    assert!(!message.contains(MOVIES_URL_ENV), "{}", message);
    assert!(!message.contains(CREDITS_URL_ENV), "{}", message);
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_unknown_export_format_stops_before_any_request() -> Result<()> {
    clear_source_env();
    let server = sources_server().await;
    let workspace = TestWorkspace::new();

    env::set_var(MOVIES_URL_ENV, movies_url(&server));
    env::set_var(CREDITS_URL_ENV, credits_url(&server));
    let empty_env = workspace.path("empty.env");
    std::fs::write(&empty_env, "")?;

    let command = LoadCommand {
        env_file: Some(empty_env),
        database_path: Some(workspace.database_path()),
        output: Some(workspace.path("cleaned.out")),
        format: Some("xlsx".to_string()),
        ..Default::default()
    };
    let result = command.execute().await;
    clear_source_env();

    assert!(result.unwrap_err().is_config());
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_env_file_run_writes_database_and_export() -> Result<()> {
    clear_source_env();
    let server = sources_server().await;
    let workspace = TestWorkspace::new();

    let env_file = workspace.path(".env");
    std::fs::write(
        &env_file,
        format!(
            "{}={}\n{}={}\n",
            MOVIES_URL_ENV,
            movies_url(&server),
            CREDITS_URL_ENV,
            credits_url(&server)
        ),
    )?;
    let export_path = workspace.path("out/cleaned.json");

    let command = LoadCommand {
        env_file: Some(env_file),
        database_path: Some(workspace.database_path()),
        output: Some(export_path.clone()),
        preview_rows: Some(2),
        ..Default::default()
    };
    let outcome = command.execute().await;
    clear_source_env();
    let outcome = outcome?;

    assert_eq!(outcome.cleaned.row_count(), 4);
    assert_eq!(outcome.database_path, workspace.database_path());
    assert!(workspace.database_path().exists());

    let exported: Value = serde_json::from_str(&std::fs::read_to_string(&export_path)?)?;
    let rows = exported.as_array().expect("JSON array");
    assert_eq!(rows.len(), 4);
    for row in rows {
        let keys: Vec<&String> = row.as_object().expect("JSON object").keys().collect();
        assert_eq!(keys.len(), 7);
    }

    let requests = server.received_requests().await.unwrap_or_default();
    assert_eq!(requests.len(), 2);
    Ok(())
}

#[tokio::test]
#[serial]
async fn test_error_status_is_reported_as_fetch_error() -> Result<()> {
    clear_source_env();
    let server = MockServer::start().await;
    crate::common::mount_status(&server, crate::common::MOVIES_PATH, 403).await;
    let workspace = TestWorkspace::new();

    env::set_var(MOVIES_URL_ENV, movies_url(&server));
    env::set_var(CREDITS_URL_ENV, credits_url(&server));
    let empty_env = workspace.path("empty.env");
    std::fs::write(&empty_env, "")?;

    let command = LoadCommand {
        env_file: Some(empty_env),
        database_path: Some(workspace.database_path()),
        ..Default::default()
    };
    let result = command.execute().await;
    clear_source_env();

    let err = result.unwrap_err();
    assert!(!err.is_config());
    assert!(err.to_string().contains("HTTP 403"));
    Ok(())
}
