pub mod export;
pub mod pivot;
pub mod summarise;

use crate::analysis::{OutputFormat, PivotConfig};
use crate::config::AppConfig;
use crate::errors::{AppError, AppResult};
use crate::processor::{CsvRecordLoader, LoadedRecords};
use crate::types::{BucketSequence, Dimension, Metric, TotalScope};
use crate::utils::time::{months_between, parse_month_key, trailing_months};
use chrono::NaiveDate;
use clap::Args;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

// ===== Shared Arguments =====

/// Record source, grouping and month window shared by pivot-based commands
#[derive(Args, Debug, Clone)]
pub struct SelectionArgs {
    /// Path to records CSV (overrides config.toml and env vars)
    #[arg(long)]
    pub csv_path: Option<PathBuf>,

    /// Grouping dimension (category, product, trainer, location, payment_method, sold_by or any CSV column)
    #[arg(long, default_value = "category")]
    pub dimension: Dimension,

    /// Optional second grouping level
    #[arg(long)]
    pub sub_dimension: Option<Dimension>,

    /// Trailing months ending with the current month (overrides config.toml)
    #[arg(long)]
    pub months: Option<u32>,

    /// First month of an explicit window (YYYY-MM)
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Last month of an explicit window (YYYY-MM)
    #[arg(long, requires = "from")]
    pub to: Option<String>,

    /// Show the most recent month first
    #[arg(long)]
    pub newest_first: bool,

    /// Row totals include records outside the window and undated records
    #[arg(long)]
    pub all_time_totals: bool,

    /// Omit the grand-total row
    #[arg(long)]
    pub no_grand_total: bool,

    /// Label for records with no value for the dimension (overrides config.toml)
    #[arg(long)]
    pub fallback_label: Option<String>,
}

impl SelectionArgs {
    /// Month window for this run, anchored on `reference`
    pub fn buckets(&self, app_config: &AppConfig, reference: NaiveDate) -> AppResult<BucketSequence> {
        let buckets = match (&self.from, &self.to) {
            (Some(from), Some(to)) => {
                let start = month_start(from)?;
                let end = month_start(to)?;
                if start > end {
                    return Err(AppError::Config(format!(
                        "--from {} is after --to {}",
                        from, to
                    )));
                }
                months_between(start, end)
            }
            _ => {
                let months = self.months.unwrap_or(app_config.pivot.window_months);
                if months == 0 {
                    return Err(AppError::Config("--months must be at least 1".to_string()));
                }
                trailing_months(reference, months)
            }
        };

        let sequence = BucketSequence::oldest_first(buckets);
        if self.newest_first || app_config.pivot.newest_first {
            Ok(sequence.reversed())
        } else {
            Ok(sequence)
        }
    }

    pub fn pivot_config(
        &self,
        metric: Metric,
        app_config: &AppConfig,
        reference: NaiveDate,
    ) -> AppResult<PivotConfig> {
        let mut config = PivotConfig::new(
            self.dimension.clone(),
            metric,
            self.buckets(app_config, reference)?,
        )
        .with_grand_total(!self.no_grand_total)
        .with_fallback_label(
            self.fallback_label
                .as_deref()
                .unwrap_or(&app_config.pivot.fallback_label),
        );

        if let Some(sub) = &self.sub_dimension {
            config = config.with_sub_dimension(sub.clone());
        }
        if self.all_time_totals {
            config = config.with_total_scope(TotalScope::AllTime);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn load_records(&self, app_config: &AppConfig) -> AppResult<LoadedRecords> {
        let csv_path = self
            .csv_path
            .clone()
            .unwrap_or_else(|| app_config.paths.records_csv.clone());

        if csv_path.as_os_str().is_empty() {
            return Err(AppError::Config(
                "No records CSV provided. Use --csv-path, set SALES_CSV_PATH or configure paths.records_csv in config.toml".to_string(),
            ));
        }
        if !csv_path.exists() {
            return Err(AppError::Config(format!(
                "CSV file does not exist: {}",
                csv_path.display()
            )));
        }

        let loaded = CsvRecordLoader::new(&csv_path).load()?;
        if loaded.stats.undated_rows > 0 {
            warn!(
                "{} of {} rows have no usable date and are left out of monthly columns",
                loaded.stats.undated_rows, loaded.stats.total_rows
            );
        }
        Ok(loaded)
    }
}

// ===== Helper Functions =====

/// Load configuration from file/environment, falling back to defaults
pub fn load_app_config() -> AppResult<AppConfig> {
    match AppConfig::load() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            Ok(config)
        }
        Err(e) => {
            warn!("Failed to load configuration: {}", e);
            Err(AppError::Config(format!(
                "Configuration error: {}. Check config.toml and SALES_ANALYTICS_* environment variables",
                e
            )))
        }
    }
}

fn month_start(key: &str) -> AppResult<NaiveDate> {
    parse_month_key(key)
        .and_then(|bucket| bucket.first_day())
        .ok_or_else(|| AppError::Config(format!("Invalid month '{}', expected YYYY-MM", key)))
}

/// Parse output format string to OutputFormat enum
pub fn parse_output_format(format: &str) -> AppResult<OutputFormat> {
    crate::analysis::reports::parse_format(format)
}

/// Write output to file with safe directory creation
pub fn write_output_to_file(path: &Path, content: &str, description: &str) -> AppResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    println!("{} written to: {}", description, path.display());
    Ok(())
}
