//! CSV export of pivot tables
//!
//! Works from the [`PivotTable`] structure, never from rendered console text.
//! Each file starts with a block of `# key: value` metadata lines followed by
//! a fully quoted CSV body, so it reads back with any CSV reader configured
//! to skip `#` comments.

use super::utils::format_export_value;
use crate::errors::{AppError, AppResult};
use crate::types::{MetricUnit, PivotRow, PivotTable, TotalScope};
use chrono::Local;
use csv::{QuoteStyle, WriterBuilder};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name for an exported table: `{dimension}[_{sub_dimension}]_{metric}.csv`
///
/// Dimension keys come from CSV headers, so they are reduced to
/// `[a-z0-9_]` and the name always stays inside the export directory.
pub fn export_file_name(table: &PivotTable) -> String {
    let dimension = file_component(table.dimension.key());
    match &table.sub_dimension {
        Some(sub) => format!(
            "{}_{}_{}.csv",
            dimension,
            file_component(sub.key()),
            table.metric.id()
        ),
        None => format!("{}_{}.csv", dimension, table.metric.id()),
    }
}

fn file_component(key: &str) -> String {
    key.chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Write `table` as CSV with its metadata header
pub fn write_pivot_csv<W: Write>(
    table: &PivotTable,
    mut out: W,
    generated_at: &str,
) -> AppResult<()> {
    write_metadata(table, &mut out, generated_at)?;

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(out);

    let two_level = table.sub_dimension.is_some();
    let unit = table.metric.unit();

    let mut header = vec!["Label".to_string()];
    if two_level {
        header.push("Parent".to_string());
    }
    header.extend(table.buckets.iter().map(|b| b.display.clone()));
    header.push("Total".to_string());
    writer.write_record(&header)?;

    for row in &table.rows {
        writer.write_record(row_fields(row, two_level.then_some(""), unit))?;
        for child in &row.children {
            writer.write_record(row_fields(child, Some(&row.label), unit))?;
        }
    }

    if let Some(grand) = &table.grand_total {
        writer.write_record(row_fields(grand, two_level.then_some(""), unit))?;
    }

    writer.flush()?;
    Ok(())
}

/// Render `table` as a CSV string, stamped with the current time
pub fn pivot_to_csv_string(table: &PivotTable) -> AppResult<String> {
    let mut buffer = Vec::new();
    write_pivot_csv(table, &mut buffer, &Local::now().to_rfc3339())?;
    String::from_utf8(buffer)
        .map_err(|e| AppError::InvalidData(format!("CSV export is not UTF-8: {}", e)))
}

/// Write one CSV file per table into `dir`, returning the paths written
///
/// Failures surface immediately as I/O or CSV errors; nothing is retried.
pub fn export_tables(tables: &[PivotTable], dir: &Path) -> AppResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let generated_at = Local::now().to_rfc3339();

    let mut written = Vec::with_capacity(tables.len());
    for table in tables {
        let path = dir.join(export_file_name(table));
        let file = BufWriter::new(File::create(&path)?);
        write_pivot_csv(table, file, &generated_at)?;
        info!("Exported {} rows to {}", table.rows.len(), path.display());
        written.push(path);
    }
    Ok(written)
}

fn write_metadata<W: Write>(table: &PivotTable, out: &mut W, generated_at: &str) -> AppResult<()> {
    let title = match &table.sub_dimension {
        Some(sub) => format!(
            "{} by {} / {}",
            table.metric.label(),
            table.dimension.label(),
            sub.label()
        ),
        None => format!("{} by {}", table.metric.label(), table.dimension.label()),
    };
    writeln!(out, "# table: {}", title)?;
    writeln!(out, "# metric: {}", table.metric.id())?;
    writeln!(out, "# dimension: {}", table.dimension.key())?;
    if let Some(sub) = &table.sub_dimension {
        writeln!(out, "# sub_dimension: {}", sub.key())?;
    }
    let keys: Vec<&str> = table.buckets.iter().map(|b| b.key.as_str()).collect();
    writeln!(out, "# buckets: {}", keys.join(" "))?;
    let scope = match table.total_scope {
        TotalScope::Window => "window",
        TotalScope::AllTime => "all_time",
    };
    writeln!(out, "# total_scope: {}", scope)?;
    writeln!(out, "# generated_at: {}", generated_at)?;
    writeln!(out, "# records: {}", table.record_count)?;
    writeln!(out, "# undated_records: {}", table.undated_count)?;
    Ok(())
}

fn row_fields(row: &PivotRow, parent: Option<&str>, unit: MetricUnit) -> Vec<String> {
    let mut fields = Vec::with_capacity(row.values.len() + 3);
    fields.push(row.label.clone());
    if let Some(parent) = parent {
        fields.push(parent.to_string());
    }
    fields.extend(row.values.iter().map(|v| format_export_value(*v, unit)));
    fields.push(format_export_value(row.total, unit));
    fields
}
