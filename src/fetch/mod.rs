//! Remote source fetching
//!
//! The movies and credits CSV files are fetched over HTTP with a shared
//! `reqwest` client. Both are plain GET requests; the body is returned as
//! text for the CSV parser.

pub mod client;

pub use client::SourceClient;
