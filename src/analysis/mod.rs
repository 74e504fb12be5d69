//! Centralised analysis module for sales and trainer analytics
//!
//! Turns a slice of [`Record`]s into grouped, month-bucketed pivot tables.
//!
//! ## Overview
//!
//! The analysis module is organised around the [`PivotEngine`] which provides
//! the main API for all analysis operations:
//!
//! - **Grouping** - One- and two-level partitions by any dimension
//! - **Metrics** - Additive, distinct, ratio-of-sums and sequence metrics
//! - **Growth** - Month-over-month change with zero sentinels
//! - **Pivot Assembly** - Rows, totals, grand total and ordering
//! - **Report Generation** - Console, JSON and CSV output
//!
//! ## Usage
//!
//! ```rust
//! use sales_analytics::analysis::{PivotConfig, PivotEngine};
//! use sales_analytics::types::{BucketSequence, Dimension, Metric, Record, TimeBucket};
//!
//! let records = vec![
//!     Record::new("01/01/2024", 100.0).with_key("category", "Yoga"),
//!     Record::new("01/02/2024", 200.0).with_key("category", "Yoga"),
//! ];
//! let buckets = BucketSequence::oldest_first(vec![
//!     TimeBucket::new(2024, 1).unwrap(),
//!     TimeBucket::new(2024, 2).unwrap(),
//! ]);
//!
//! let engine = PivotEngine::new(&records);
//! let config = PivotConfig::new(Dimension::Category, Metric::Revenue, buckets);
//! let table = engine.pivot(&config).unwrap();
//! assert_eq!(table.rows[0].total, 300.0);
//! ```

pub mod grouping;
pub mod growth;
pub mod metrics;
pub mod pivot;
pub mod reports;
pub mod sequence;

// Re-export main types and interfaces
pub use grouping::{partition, partition_by, partition_nested, Group, DEFAULT_FALLBACK_LABEL};
pub use growth::{growth, growth_series};
pub use metrics::{evaluate, MetricComponents};
pub use pivot::{build_pivot, PivotConfig, GRAND_TOTAL_LABEL};
pub use reports::{OutputFormat, ReportFormatter};

use crate::errors::AppResult;
use crate::types::{Metric, PivotTable, Record};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Dataset-level overview shown alongside pivot output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub dated_records: usize,
    pub undated_records: usize,
    pub earliest_date: Option<NaiveDate>,
    pub latest_date: Option<NaiveDate>,
    pub total_revenue: f64,
    pub distinct_members: usize,
}

/// Main analysis engine over a borrowed record set
///
/// Holds no state besides the records; every call recomputes from them.
pub struct PivotEngine<'a> {
    records: &'a [Record],
}

impl<'a> PivotEngine<'a> {
    pub fn new(records: &'a [Record]) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &'a [Record] {
        self.records
    }

    /// Build one pivot table
    ///
    /// # Errors
    /// Returns [`AppError::Config`](crate::errors::AppError::Config) when the
    /// config is invalid (no buckets, blank fallback label, sub-dimension
    /// equal to the dimension).
    pub fn pivot(&self, config: &PivotConfig) -> AppResult<PivotTable> {
        config.validate()?;
        let table = build_pivot(self.records, config);
        info!(
            "Built {} by {} pivot: {} rows over {} months",
            config.metric,
            config.dimension,
            table.rows.len(),
            table.buckets.len()
        );
        Ok(table)
    }

    /// Build one table per metric, sharing grouping and buckets
    pub fn pivot_metrics(
        &self,
        metrics: &[Metric],
        config: &PivotConfig,
    ) -> AppResult<Vec<PivotTable>> {
        config.validate()?;
        let tables: Vec<PivotTable> = metrics
            .iter()
            .map(|metric| build_pivot(self.records, &config.clone().with_metric(*metric)))
            .collect();
        debug!("Built {} pivot tables", tables.len());
        Ok(tables)
    }

    /// Dataset overview: record counts, date range, revenue and members
    pub fn summary_stats(&self) -> DatasetSummary {
        let components = MetricComponents::from_records(self.records);
        let dates = self.records.iter().filter_map(|r| r.date);

        let (earliest_date, latest_date) = dates.fold((None, None), |(min, max), date| {
            (
                Some(min.map_or(date, |m: NaiveDate| m.min(date))),
                Some(max.map_or(date, |m: NaiveDate| m.max(date))),
            )
        });

        let dated_records = self.records.iter().filter(|r| r.is_dated()).count();

        DatasetSummary {
            total_records: self.records.len(),
            dated_records,
            undated_records: self.records.len() - dated_records,
            earliest_date,
            latest_date,
            total_revenue: components.value(Metric::Revenue),
            distinct_members: components.distinct_identities(),
        }
    }
}
