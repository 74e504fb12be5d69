use crate::utils::time::DEFAULT_WINDOW_MONTHS;
use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub pivot: PivotDefaults,
    pub export: ExportConfig,
    pub summary: SummaryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    pub records_csv: PathBuf,
}

/// Defaults applied when a pivot command does not specify them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PivotDefaults {
    pub window_months: u32,
    pub fallback_label: String,
    pub newest_first: bool,
}

impl Default for PivotDefaults {
    fn default() -> Self {
        Self {
            window_months: DEFAULT_WINDOW_MONTHS,
            fallback_label: "Unknown".to_string(),
            newest_first: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub output_dir: PathBuf,
}

/// Narrative summary service configuration
///
/// An empty `endpoint` disables the service; callers then receive the
/// placeholder summary instead of an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryConfig {
    pub endpoint: String,
    pub api_key: String,
    pub timeout_seconds: u64,
    pub max_retries: usize,
    pub initial_backoff_ms: u64,
    pub backoff_multiplier: f64,
    pub max_backoff_seconds: u64,
    pub sample_rows: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            timeout_seconds: 30,
            max_retries: 2,
            initial_backoff_ms: 1000,
            backoff_multiplier: 2.0,
            max_backoff_seconds: 10,
            sample_rows: 20,
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let AppConfig {
            paths,
            pivot,
            export,
            summary,
        } = Self::get_defaults();
        let config = Config::builder()
            .set_default("paths.records_csv", paths.records_csv.to_string_lossy().to_string())?
            .set_default("pivot.window_months", pivot.window_months as i64)?
            .set_default("pivot.fallback_label", pivot.fallback_label)?
            .set_default("pivot.newest_first", pivot.newest_first)?
            .set_default(
                "export.output_dir",
                export.output_dir.to_string_lossy().to_string(),
            )?
            // Summary service defaults
            .set_default("summary.endpoint", summary.endpoint)?
            .set_default("summary.api_key", summary.api_key)?
            .set_default("summary.timeout_seconds", summary.timeout_seconds)?
            .set_default("summary.max_retries", summary.max_retries as i64)?
            .set_default("summary.initial_backoff_ms", summary.initial_backoff_ms)?
            .set_default("summary.backoff_multiplier", summary.backoff_multiplier)?
            .set_default("summary.max_backoff_seconds", summary.max_backoff_seconds)?
            .set_default("summary.sample_rows", summary.sample_rows as i64)?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // SALES_ANALYTICS_PIVOT__WINDOW_MONTHS=12 style overrides
            .add_source(
                config::Environment::with_prefix("SALES_ANALYTICS")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        if let Ok(csv_path) = env::var("SALES_CSV_PATH") {
            app_config.paths.records_csv = PathBuf::from(csv_path);
        }

        if app_config.pivot.window_months == 0 {
            return Err(ConfigError::Message(
                "pivot.window_months must be at least 1".to_string(),
            ));
        }

        Ok(app_config)
    }

    /// Built-in defaults, the base layer under config.toml and environment
    pub fn get_defaults() -> Self {
        Self {
            paths: PathsConfig {
                records_csv: PathBuf::new(),
            },
            pivot: PivotDefaults::default(),
            export: ExportConfig {
                output_dir: PathBuf::from("./output_data/exports"),
            },
            summary: SummaryConfig::default(),
        }
    }
}
