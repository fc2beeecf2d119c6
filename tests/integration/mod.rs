//! Integration Tests Module
//!
//! End-to-end runs of the loader against mock HTTP sources.

pub mod cli_load;
