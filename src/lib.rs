//! Movie/Credits Loader
//!
//! Fetches a movies CSV and a credits CSV, stores both in SQLite, joins
//! them on title and produces the cleaned projection used downstream.

pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod fetch;
pub mod output;
pub mod processor;
pub mod types;
