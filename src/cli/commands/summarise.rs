use super::{load_app_config, SelectionArgs};
use crate::analysis::PivotEngine;
use crate::errors::AppResult;
use crate::summary::{SummaryClient, SummaryRequest};
use crate::types::Metric;
use chrono::Local;
use clap::Args;
use tracing::info;

/// Build a pivot table and ask the summary service to describe it
#[derive(Args)]
pub struct SummariseCommand {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Metric to summarise
    #[arg(long, default_value = "revenue")]
    pub metric: Metric,

    /// Rows sent to the service (overrides config.toml)
    #[arg(long)]
    pub sample_rows: Option<usize>,
}

impl SummariseCommand {
    pub async fn run(&self) -> AppResult<()> {
        info!("=== Sales Analytics - Summary ===");

        let app_config = load_app_config()?;
        let reference = Local::now().date_naive();
        let config = self
            .selection
            .pivot_config(self.metric, &app_config, reference)?;

        let loaded = self.selection.load_records(&app_config)?;
        let table = PivotEngine::new(&loaded.records).pivot(&config)?;

        let sample_rows = self.sample_rows.unwrap_or(app_config.summary.sample_rows);
        let request = SummaryRequest::from_pivot(&table, sample_rows);
        let client = SummaryClient::new(&app_config.summary)?;
        let summary = client.summarise(&request).await;

        println!("\n📝 {}", request.table_name);
        println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
        println!("{}", summary.summary);
        if !summary.key_insights.is_empty() {
            println!("\nKey insights:");
            for insight in &summary.key_insights {
                println!("  • {}", insight);
            }
        }
        if !summary.trends.is_empty() {
            println!("\nTrends:");
            for trend in &summary.trends {
                println!("  • {}", trend);
            }
        }
        if summary.degraded {
            println!("\n(Summary unavailable; showing placeholder)");
        }
        Ok(())
    }
}
