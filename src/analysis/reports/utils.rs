//! Utility functions for report formatting
//!
//! Shared formatting helpers used by the pivot formatters.

use crate::errors::AppResult;
use crate::types::MetricUnit;
use crate::utils::currency::{format_amount, format_count};
use serde::Serialize;

/// Format a metric value for console output according to its unit
///
/// # Examples
///
/// ```
/// # use sales_analytics::analysis::reports::utils::format_metric_value;
/// # use sales_analytics::types::MetricUnit;
/// assert_eq!(format_metric_value(1234.5, MetricUnit::Currency), "1,234.50");
/// assert_eq!(format_metric_value(12.0, MetricUnit::Count), "12");
/// assert_eq!(format_metric_value(12.5, MetricUnit::Percentage), "12.5%");
/// assert_eq!(format_metric_value(15.0, MetricUnit::Days), "15.0 d");
/// ```
pub fn format_metric_value(value: f64, unit: MetricUnit) -> String {
    match unit {
        MetricUnit::Currency => format_amount(value),
        MetricUnit::Count => format_count(value),
        MetricUnit::Ratio => format!("{:.2}", value),
        MetricUnit::Percentage => format!("{:.1}%", value),
        MetricUnit::Days => format!("{:.1} d", value),
    }
}

/// Plain numeric rendering for machine-readable exports
///
/// Integers print without a fractional part. Ratios and percentages keep four
/// decimals, everything else two. No thousand separators.
pub fn format_export_value(value: f64, unit: MetricUnit) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    match unit {
        MetricUnit::Ratio | MetricUnit::Percentage => format!("{:.4}", value),
        MetricUnit::Currency | MetricUnit::Count | MetricUnit::Days => format!("{:.2}", value),
    }
}

/// Export data as JSON for programmatic use
pub fn export_json<T: Serialize>(data: &T) -> AppResult<String> {
    serde_json::to_string_pretty(data)
        .map_err(|e| crate::errors::AppError::Config(format!("JSON export failed: {}", e)))
}

/// Truncate `label` to `width` characters, marking the cut with `…`
pub fn fit_label(label: &str, width: usize) -> String {
    if label.chars().count() <= width {
        label.to_string()
    } else {
        let kept: String = label.chars().take(width.saturating_sub(1)).collect();
        format!("{}…", kept)
    }
}
