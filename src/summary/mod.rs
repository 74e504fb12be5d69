//! Narrative summaries of pivot tables
//!
//! A pivot table is reduced to a [`SummaryRequest`] (column definitions plus a
//! sample of rows) and sent to an external summary service. Whatever happens
//! on the wire, callers of [`SummaryClient::summarise`] get a
//! [`NarrativeSummary`] back; failures degrade to a placeholder.

pub mod client;
pub mod retry;

pub use client::SummaryClient;
pub use retry::{calculate_next_backoff, retry_with_backoff, RetryPolicy};

use crate::types::{MetricUnit, PivotRow, PivotTable};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Text,
    Number,
    Currency,
    Percentage,
    Date,
}

impl From<MetricUnit> for ColumnType {
    fn from(unit: MetricUnit) -> Self {
        match unit {
            MetricUnit::Currency => ColumnType::Currency,
            MetricUnit::Percentage => ColumnType::Percentage,
            MetricUnit::Count | MetricUnit::Ratio | MetricUnit::Days => ColumnType::Number,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnDefinition {
    pub name: String,
    pub column_type: ColumnType,
}

impl ColumnDefinition {
    pub fn new(name: &str, column_type: ColumnType) -> Self {
        Self {
            name: name.to_string(),
            column_type,
        }
    }
}

/// Payload sent to the summary service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRequest {
    pub table_name: String,
    pub columns: Vec<ColumnDefinition>,
    /// One entry per row, aligned with `columns`
    pub rows: Vec<Vec<Value>>,
}

impl SummaryRequest {
    /// Describe `table` using its top `sample_rows` rows plus the grand total
    pub fn from_pivot(table: &PivotTable, sample_rows: usize) -> Self {
        let value_type = ColumnType::from(table.metric.unit());

        let mut columns = vec![ColumnDefinition::new(
            &table.dimension.label(),
            ColumnType::Text,
        )];
        columns.extend(
            table
                .buckets
                .iter()
                .map(|b| ColumnDefinition::new(&b.display, value_type)),
        );
        columns.push(ColumnDefinition::new("Total", value_type));

        let mut rows: Vec<Vec<Value>> = table
            .rows
            .iter()
            .take(sample_rows)
            .map(row_values)
            .collect();
        if let Some(grand) = &table.grand_total {
            rows.push(row_values(grand));
        }

        Self {
            table_name: format!("{} by {}", table.metric.label(), table.dimension.label()),
            columns,
            rows,
        }
    }
}

fn row_values(row: &PivotRow) -> Vec<Value> {
    let mut values = Vec::with_capacity(row.values.len() + 2);
    values.push(Value::from(row.label.clone()));
    values.extend(row.values.iter().map(|v| Value::from(*v)));
    values.push(Value::from(row.total));
    values
}

/// Narrative returned by the summary service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrativeSummary {
    pub summary: String,
    #[serde(default)]
    pub key_insights: Vec<String>,
    #[serde(default)]
    pub trends: Vec<String>,
    /// Set when this is a stand-in for a summary that could not be produced
    #[serde(default)]
    pub degraded: bool,
}

impl NarrativeSummary {
    pub fn placeholder(message: &str) -> Self {
        Self {
            summary: message.to_string(),
            key_insights: Vec::new(),
            trends: Vec::new(),
            degraded: true,
        }
    }
}
