//! Pivot table result types

use super::bucket::BucketSequence;
use super::dimension::Dimension;
use super::metric::Metric;
use serde::{Deserialize, Serialize};

/// Period-over-period change between two bucket values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Growth {
    /// `(current - previous) / previous * 100`
    Percent(f64),
    /// Previous was zero and current is positive; reported as +100%
    FromZero,
    /// Both zero; no meaningful change
    Undefined,
}

impl Growth {
    /// Display sentinel used when growth is undefined
    pub const UNDEFINED_DISPLAY: &'static str = "—";

    /// Numeric percentage, `None` for [`Growth::Undefined`]
    pub fn as_percent(&self) -> Option<f64> {
        match self {
            Growth::Percent(value) => Some(*value),
            Growth::FromZero => Some(100.0),
            Growth::Undefined => None,
        }
    }

    /// `+12.5%`, `-3.0%`, `+100%`, `—`
    pub fn display(&self) -> String {
        match self {
            Growth::Percent(value) => format!("{:+.1}%", value),
            Growth::FromZero => "+100%".to_string(),
            Growth::Undefined => Self::UNDEFINED_DISPLAY.to_string(),
        }
    }
}

/// Whether row and grand totals cover only the bucket window or all records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TotalScope {
    /// Records dated inside the bucket window
    #[default]
    Window,
    /// Every record in the group, including undated ones
    AllTime,
}

/// One group's values across the bucket window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotRow {
    pub label: String,
    /// Aligned with the table's buckets
    pub values: Vec<f64>,
    pub total: f64,
    /// Records in this group (all of them, dated or not)
    pub record_count: usize,
    /// Growth vs the chronologically previous bucket; `None` where that
    /// bucket is outside the window
    pub growth: Vec<Option<Growth>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PivotRow>,
}

impl PivotRow {
    pub fn value_at(&self, index: usize) -> f64 {
        self.values.get(index).copied().unwrap_or(0.0)
    }

    /// Value for a `YYYY-MM` key, 0.0 if the key is outside the window
    pub fn value_for(&self, buckets: &BucketSequence, key: &str) -> f64 {
        buckets
            .position_of(key)
            .map(|i| self.value_at(i))
            .unwrap_or(0.0)
    }

    pub fn child(&self, label: &str) -> Option<&PivotRow> {
        self.children.iter().find(|c| c.label == label)
    }
}

/// Grouped, time-bucketed metric table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PivotTable {
    pub metric: Metric,
    pub dimension: Dimension,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_dimension: Option<Dimension>,
    pub buckets: BucketSequence,
    pub total_scope: TotalScope,
    /// Sorted by descending total, ties in first-seen order
    pub rows: Vec<PivotRow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grand_total: Option<PivotRow>,
    /// Input records considered
    pub record_count: usize,
    /// Input records without a usable date
    pub undated_count: usize,
}

impl PivotTable {
    pub fn row(&self, label: &str) -> Option<&PivotRow> {
        self.rows.iter().find(|r| r.label == label)
    }

    /// Value of `row_label` in bucket `key`
    pub fn value(&self, row_label: &str, key: &str) -> Option<f64> {
        let row = self.row(row_label)?;
        let index = self.buckets.position_of(key)?;
        Some(row.value_at(index))
    }

    /// `(label, value)` pairs for one bucket, in row order
    pub fn column(&self, key: &str) -> Vec<(&str, f64)> {
        match self.buckets.position_of(key) {
            Some(index) => self
                .rows
                .iter()
                .map(|r| (r.label.as_str(), r.value_at(index)))
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Year-over-year growth for a row at a bucket, when the same month of the
    /// previous year is inside the window
    pub fn year_over_year(&self, row: &PivotRow, index: usize) -> Option<Growth> {
        let previous = self.buckets.year_ago_index(index)?;
        Some(crate::analysis::growth::growth(
            row.value_at(index),
            row.value_at(previous),
        ))
    }
}
