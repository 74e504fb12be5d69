use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Sales and Trainer Analytics Pivot Engine
#[derive(Parser)]
#[command(name = "sales-analytics")]
#[command(about = "Sales and Trainer Analytics Pivot Engine")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Build a month-by-month pivot table for one metric
    Pivot(commands::pivot::PivotCommand),
    /// Export one CSV per metric for the same grouping and window
    Export(commands::export::ExportCommand),
    /// Ask the summary service for a narrative of a pivot table
    Summarise(commands::summarise::SummariseCommand),
}

pub async fn run() -> AppResult<()> {
    // Initialise tracing subscriber to capture info!() macros
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Pivot(command) => command.run(),
        Commands::Export(command) => command.run(),
        Commands::Summarise(command) => command.run().await,
    }
}
