//! Report formatting and output generation
//!
//! Provides formatting for pivot tables via the [`ReportFormatter`] facade.
//! Supports Console, JSON, and CSV output formats.

pub mod csv_export;
pub mod pivot;
pub mod utils;

use crate::analysis::DatasetSummary;
use crate::errors::{AppError, AppResult};
use crate::types::PivotTable;
use std::path::{Path, PathBuf};

/// Output format options for pivot reports
#[derive(Debug, Clone, Default, PartialEq)]
pub enum OutputFormat {
    #[default]
    Console,
    Json,
    Csv,
}

/// Parse a `--format` argument
pub fn parse_format(value: &str) -> AppResult<OutputFormat> {
    match value.trim().to_lowercase().as_str() {
        "console" | "text" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "csv" => Ok(OutputFormat::Csv),
        other => Err(AppError::Config(format!(
            "Unknown output format '{}' (expected console, json or csv)",
            other
        ))),
    }
}

/// Facade for all report formatting operations
pub struct ReportFormatter;

impl ReportFormatter {
    // Utilities
    pub fn format_number(n: usize) -> String {
        crate::utils::currency::format_thousands(n as i64)
    }

    // Pivot
    pub fn format_pivot(t: &PivotTable, f: &OutputFormat) -> AppResult<String> {
        pivot::format_pivot(t, f)
    }

    pub fn format_dataset_summary(s: &DatasetSummary) -> String {
        pivot::format_dataset_summary(s)
    }

    // Export
    pub fn export_tables(tables: &[PivotTable], dir: &Path) -> AppResult<Vec<PathBuf>> {
        csv_export::export_tables(tables, dir)
    }
}
