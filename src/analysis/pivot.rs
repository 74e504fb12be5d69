//! Pivot assembler
//!
//! Builds a [`PivotTable`] from records: one row per group, one value per
//! month bucket, a row total, growth against the previous month and an
//! optional grand-total row.
//!
//! ## Key Design Decisions
//!
//! - **Recompute, never roll up**: each cell, row total and the grand total is
//!   evaluated from the raw records it covers. Summing or averaging finished
//!   cell values is wrong for ratio, distinct and sequence metrics.
//! - **Stable ordering**: rows sort by descending total with a stable sort, so
//!   ties keep first-seen input order.
//! - **Undated records**: never placed in a bucket; they count towards totals
//!   only under [`TotalScope::AllTime`].

use super::growth::growth_series;
use super::grouping::{partition, partition_nested, Group, DEFAULT_FALLBACK_LABEL};
use super::metrics::MetricComponents;
use crate::errors::{AppError, AppResult};
use crate::types::{
    BucketSequence, Dimension, Metric, PivotRow, PivotTable, Record, TotalScope,
};
use std::cmp::Ordering;
use tracing::debug;

/// Label of the grand-total row
pub const GRAND_TOTAL_LABEL: &str = "Grand Total";

/// Everything that determines a pivot table besides the records
#[derive(Debug, Clone, PartialEq)]
pub struct PivotConfig {
    pub dimension: Dimension,
    pub sub_dimension: Option<Dimension>,
    pub metric: Metric,
    pub buckets: BucketSequence,
    pub total_scope: TotalScope,
    pub include_grand_total: bool,
    pub fallback_label: String,
}

impl PivotConfig {
    pub fn new(dimension: Dimension, metric: Metric, buckets: BucketSequence) -> Self {
        Self {
            dimension,
            sub_dimension: None,
            metric,
            buckets,
            total_scope: TotalScope::Window,
            include_grand_total: true,
            fallback_label: DEFAULT_FALLBACK_LABEL.to_string(),
        }
    }

    pub fn with_sub_dimension(mut self, sub_dimension: Dimension) -> Self {
        self.sub_dimension = Some(sub_dimension);
        self
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metric = metric;
        self
    }

    pub fn with_total_scope(mut self, scope: TotalScope) -> Self {
        self.total_scope = scope;
        self
    }

    pub fn with_grand_total(mut self, include: bool) -> Self {
        self.include_grand_total = include;
        self
    }

    pub fn with_fallback_label(mut self, label: &str) -> Self {
        self.fallback_label = label.to_string();
        self
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.buckets.is_empty() {
            return Err(AppError::Config(
                "Pivot needs at least one month bucket".to_string(),
            ));
        }
        if self.fallback_label.trim().is_empty() {
            return Err(AppError::Config(
                "Fallback label cannot be empty".to_string(),
            ));
        }
        if self.sub_dimension.as_ref() == Some(&self.dimension) {
            return Err(AppError::Config(format!(
                "Sub-dimension must differ from dimension '{}'",
                self.dimension
            )));
        }
        Ok(())
    }
}

/// Build the pivot table for `records`
///
/// Pure: the same records and config always produce the same table, and the
/// records are not modified.
pub fn build_pivot(records: &[Record], config: &PivotConfig) -> PivotTable {
    let groups = match &config.sub_dimension {
        Some(inner) => {
            partition_nested(records, &config.dimension, inner, &config.fallback_label)
        }
        None => partition(records, &config.dimension, &config.fallback_label),
    };

    let mut rows: Vec<PivotRow> = groups.iter().map(|g| build_group_row(g, config)).collect();
    sort_rows(&mut rows);

    let grand_total = config.include_grand_total.then(|| {
        let all: Vec<&Record> = records.iter().collect();
        build_row(GRAND_TOTAL_LABEL, &all, Vec::new(), config)
    });

    let undated_count = records.iter().filter(|r| !r.is_dated()).count();

    debug!(
        "Pivot {} by {}: {} rows, {} buckets, {} records ({} undated)",
        config.metric,
        config.dimension,
        rows.len(),
        config.buckets.len(),
        records.len(),
        undated_count
    );

    PivotTable {
        metric: config.metric,
        dimension: config.dimension.clone(),
        sub_dimension: config.sub_dimension.clone(),
        buckets: config.buckets.clone(),
        total_scope: config.total_scope,
        rows,
        grand_total,
        record_count: records.len(),
        undated_count,
    }
}

fn build_group_row(group: &Group<'_>, config: &PivotConfig) -> PivotRow {
    let mut children: Vec<PivotRow> = group
        .children
        .iter()
        .map(|child| build_group_row(child, config))
        .collect();
    sort_rows(&mut children);
    build_row(&group.label, &group.records, children, config)
}

fn build_row(
    label: &str,
    records: &[&Record],
    children: Vec<PivotRow>,
    config: &PivotConfig,
) -> PivotRow {
    let buckets = &config.buckets;
    let mut cells = vec![MetricComponents::new(); buckets.len()];
    let mut window = MetricComponents::new();

    for record in records {
        let Some(date) = record.date else {
            continue;
        };
        if let Some(index) = buckets.bucket_for(date) {
            cells[index].add(record);
            window.add(record);
        }
    }

    let total = match config.total_scope {
        TotalScope::Window => window.value(config.metric),
        TotalScope::AllTime => {
            MetricComponents::from_records(records.iter().copied()).value(config.metric)
        }
    };

    let values: Vec<f64> = cells.iter().map(|c| c.value(config.metric)).collect();
    let growth = growth_series(&values, |i| buckets.previous_index(i));

    PivotRow {
        label: label.to_string(),
        values,
        total,
        record_count: records.len(),
        growth,
        children,
    }
}

/// Descending by total; stable, so equal totals keep their existing order
fn sort_rows(rows: &mut [PivotRow]) {
    rows.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));
}
