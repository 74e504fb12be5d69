use super::{load_app_config, parse_output_format, write_output_to_file, SelectionArgs};
use crate::analysis::{OutputFormat, PivotEngine, ReportFormatter};
use crate::errors::AppResult;
use crate::types::Metric;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

/// Build a single pivot table and print or save it
#[derive(Args)]
pub struct PivotCommand {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Metric to compute (revenue, transactions, atv, upt, members, repeatRate, ...)
    #[arg(long, default_value = "revenue")]
    pub metric: Metric,

    /// Output format: console, json, csv
    #[arg(long, default_value = "console")]
    pub format: String,

    /// Write output to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl PivotCommand {
    pub fn run(&self) -> AppResult<()> {
        info!("=== Sales Analytics - Pivot ===");

        let app_config = load_app_config()?;
        let format = parse_output_format(&self.format)?;
        // One reference date per run so every bucket shares the same window
        let reference = Local::now().date_naive();
        let config = self
            .selection
            .pivot_config(self.metric, &app_config, reference)?;

        let loaded = self.selection.load_records(&app_config)?;
        let engine = PivotEngine::new(&loaded.records);
        let table = engine.pivot(&config)?;
        let mut output = ReportFormatter::format_pivot(&table, &format)?;
        if format == OutputFormat::Console {
            output.insert_str(
                0,
                &ReportFormatter::format_dataset_summary(&engine.summary_stats()),
            );
        }

        match &self.output {
            Some(path) => write_output_to_file(path, &output, "Pivot table")?,
            None if format == OutputFormat::Console => print!("{}", output),
            None => println!("{}", output),
        }
        Ok(())
    }
}
