use super::{load_app_config, SelectionArgs};
use crate::analysis::{PivotEngine, ReportFormatter};
use crate::errors::{AppError, AppResult};
use crate::types::Metric;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Export one CSV per metric for the same grouping and window
#[derive(Args)]
pub struct ExportCommand {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Comma-separated metrics to export (defaults to every metric)
    #[arg(long, value_delimiter = ',')]
    pub metrics: Vec<Metric>,

    /// Directory for the CSV files (overrides config.toml)
    #[arg(long)]
    pub out_dir: Option<PathBuf>,
}

impl ExportCommand {
    pub fn run(&self) -> AppResult<()> {
        info!("=== Sales Analytics - Export ===");

        let app_config = load_app_config()?;
        let reference = Local::now().date_naive();
        let metrics: Vec<Metric> = if self.metrics.is_empty() {
            Metric::ALL.to_vec()
        } else {
            self.metrics.clone()
        };
        let first = metrics
            .first()
            .copied()
            .ok_or_else(|| AppError::Config("No metrics selected".to_string()))?;
        let config = self.selection.pivot_config(first, &app_config, reference)?;

        let loaded = self.selection.load_records(&app_config)?;
        let tables = PivotEngine::new(&loaded.records).pivot_metrics(&metrics, &config)?;

        let out_dir = self
            .out_dir
            .clone()
            .unwrap_or_else(|| app_config.export.output_dir.clone());
        let written = ReportFormatter::export_tables(&tables, &out_dir)?;

        println!(
            "Exported {} tables ({} records, {} undated) to {}",
            written.len(),
            ReportFormatter::format_number(loaded.stats.total_rows),
            ReportFormatter::format_number(loaded.stats.undated_rows),
            out_dir.display()
        );
        for path in &written {
            println!("  {}", path.display());
        }
        Ok(())
    }
}
