//! Pivot table report formatter
//!
//! Fixed-width console table with one column per month bucket, plus a growth
//! line for the most recent bucket.

use super::csv_export::pivot_to_csv_string;
use super::utils::{export_json, fit_label, format_metric_value};
use super::OutputFormat;
use crate::analysis::DatasetSummary;
use crate::errors::AppResult;
use crate::types::{Growth, MetricUnit, PivotRow, PivotTable};
use crate::utils::currency::{format_amount, format_thousands};

const LABEL_WIDTH: usize = 24;
const VALUE_WIDTH: usize = 14;

/// Format a pivot table
pub fn format_pivot(table: &PivotTable, format: &OutputFormat) -> AppResult<String> {
    match format {
        OutputFormat::Json => export_json(table),
        OutputFormat::Csv => pivot_to_csv_string(table),
        OutputFormat::Console => Ok(format_console(table)),
    }
}

/// Dataset overview printed above a console pivot
pub fn format_dataset_summary(summary: &DatasetSummary) -> String {
    let mut output = String::new();
    output.push_str("\n📋 Dataset\n");
    output.push_str(&format!(
        "  Records: {} ({} dated, {} undated)\n",
        format_thousands(summary.total_records as i64),
        format_thousands(summary.dated_records as i64),
        format_thousands(summary.undated_records as i64)
    ));
    if let (Some(earliest), Some(latest)) = (summary.earliest_date, summary.latest_date) {
        output.push_str(&format!("  Date range: {} to {}\n", earliest, latest));
    }
    output.push_str(&format!(
        "  Revenue: {}\n",
        format_amount(summary.total_revenue)
    ));
    output.push_str(&format!(
        "  Members: {}\n",
        format_thousands(summary.distinct_members as i64)
    ));
    output
}

fn format_console(table: &PivotTable) -> String {
    let mut output = String::new();
    let unit = table.metric.unit();

    // Header
    let title = match &table.sub_dimension {
        Some(sub) => format!(
            "{} by {} / {}",
            table.metric.label(),
            table.dimension.label(),
            sub.label()
        ),
        None => format!("{} by {}", table.metric.label(), table.dimension.label()),
    };
    output.push_str(&format!("\n📊 {}\n", title));
    output.push_str("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n\n");

    output.push_str(&format!(
        "Records: {} ({} undated)\n",
        format_thousands(table.record_count as i64),
        format_thousands(table.undated_count as i64)
    ));
    if let (Some(first), Some(last)) = (table.buckets.iter().next(), table.buckets.iter().last()) {
        output.push_str(&format!(
            "Months: {} ({} to {})\n\n",
            table.buckets.len(),
            first.display,
            last.display
        ));
    }

    if table.is_empty() {
        output.push_str("No records found.\n");
        return output;
    }

    // Column header
    output.push_str(&format!("  {:<width$}", table.dimension.label(), width = LABEL_WIDTH));
    for bucket in &table.buckets {
        output.push_str(&format!(" {:>width$}", bucket.display, width = VALUE_WIDTH));
    }
    output.push_str(&format!(" {:>width$}\n", "Total", width = VALUE_WIDTH));

    let rule_len = LABEL_WIDTH + (VALUE_WIDTH + 1) * (table.buckets.len() + 1);
    output.push_str(&format!("  {}\n", "-".repeat(rule_len)));

    for row in &table.rows {
        push_row(&mut output, row, &row.label, unit);
        for child in &row.children {
            push_row(&mut output, child, &format!("  {}", child.label), unit);
        }
    }

    if let Some(grand) = &table.grand_total {
        output.push_str(&format!("  {}\n", "-".repeat(rule_len)));
        push_row(&mut output, grand, &grand.label, unit);
    }
    output.push('\n');

    // Growth for the newest month
    if let Some(latest) = table.buckets.latest_index() {
        let bucket = &table.buckets.buckets()[latest];
        output.push_str(&format!("Growth in {}:\n", bucket.display));
        output.push_str(&format!(
            "  {:<width$} {:>10} {:>10}\n",
            "",
            "vs month",
            "vs year",
            width = LABEL_WIDTH
        ));
        for row in &table.rows {
            let month_over_month = row.growth.get(latest).copied().flatten();
            let year_over_year = table.year_over_year(row, latest);
            output.push_str(&format!(
                "  {:<width$} {:>10} {:>10}\n",
                fit_label(&row.label, LABEL_WIDTH),
                growth_cell(month_over_month),
                growth_cell(year_over_year),
                width = LABEL_WIDTH
            ));
        }
        output.push('\n');
    }

    output.push_str("Note: For machine-readable output, use --format json or --format csv\n");
    output
}

fn growth_cell(growth: Option<Growth>) -> String {
    growth
        .map(|g| g.display())
        .unwrap_or_else(|| "n/a".to_string())
}

fn push_row(output: &mut String, row: &PivotRow, label: &str, unit: MetricUnit) {
    output.push_str(&format!(
        "  {:<width$}",
        fit_label(label, LABEL_WIDTH),
        width = LABEL_WIDTH
    ));
    for value in &row.values {
        output.push_str(&format!(
            " {:>width$}",
            format_metric_value(*value, unit),
            width = VALUE_WIDTH
        ));
    }
    output.push_str(&format!(
        " {:>width$}\n",
        format_metric_value(row.total, unit),
        width = VALUE_WIDTH
    ));
}
