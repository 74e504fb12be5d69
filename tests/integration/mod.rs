//! Integration Tests Module
//!
//! End-to-end tests that load CSV files and run the full pivot pipeline.

pub mod csv_pipeline;
pub mod export;
