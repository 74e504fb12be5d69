//! CSV to pivot pipeline
//!
//! Loads a studio export from disk and checks the resulting tables end to end,
//! including through the compiled binary.

use sales_analytics::analysis::{OutputFormat, PivotConfig, PivotEngine, ReportFormatter};
use sales_analytics::processor::CsvRecordLoader;
use sales_analytics::types::{Dimension, Growth, Metric, TotalScope};
use std::process::Command;

use crate::common::{assert_close, buckets, write_csv, STUDIO_CSV};

fn jan_feb() -> sales_analytics::types::BucketSequence {
    buckets(&[(2024, 1), (2024, 2)])
}

#[test]
fn test_load_studio_export() {
    let file = write_csv(STUDIO_CSV);
    let loaded = CsvRecordLoader::new(file.path()).load().unwrap();

    assert_eq!(loaded.stats.total_rows, 6);
    assert_eq!(loaded.stats.undated_rows, 1);
    assert_eq!(loaded.stats.invalid_numeric_fields, 0);
    assert_eq!(
        loaded.dimension_columns,
        vec!["category", "product", "trainer"]
    );
    assert_eq!(loaded.records[3].identity, "m3@studio.test");
    assert_eq!(loaded.records[3].units, 2.0);
}

#[test]
fn test_revenue_by_category() {
    let file = write_csv(STUDIO_CSV);
    let loaded = CsvRecordLoader::new(file.path()).load().unwrap();
    let engine = PivotEngine::new(&loaded.records);

    let config = PivotConfig::new(Dimension::Category, Metric::Revenue, jan_feb());
    let table = engine.pivot(&config).unwrap();

    let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["Yoga", "Pilates", "Retail"]);

    let yoga = table.row("Yoga").unwrap();
    assert_eq!(yoga.values, vec![100.0, 280.0]);
    assert_eq!(yoga.total, 380.0);
    assert_eq!(yoga.growth[1], Some(Growth::Percent(180.0)));

    let pilates = table.row("Pilates").unwrap();
    assert_eq!(pilates.growth[1], Some(Growth::Percent(-20.0)));

    let retail = table.row("Retail").unwrap();
    assert_eq!(retail.total, 0.0);
    assert_eq!(retail.growth[1], Some(Growth::Undefined));

    let grand = table.grand_total.as_ref().unwrap();
    assert_eq!(grand.values, vec![150.0, 320.0]);
    assert_eq!(grand.total, 470.0);
}

#[test]
fn test_trainer_pivot_with_all_time_totals() {
    let file = write_csv(STUDIO_CSV);
    let loaded = CsvRecordLoader::new(file.path()).load().unwrap();
    let engine = PivotEngine::new(&loaded.records);

    let window = PivotConfig::new(Dimension::Trainer, Metric::Revenue, jan_feb());
    let table = engine.pivot(&window).unwrap();
    let totals: Vec<(&str, f64)> = table
        .rows
        .iter()
        .map(|r| (r.label.as_str(), r.total))
        .collect();
    assert_eq!(totals, vec![("Sam", 300.0), ("Alex", 130.0), ("Unknown", 40.0)]);

    let all_time = window.with_total_scope(TotalScope::AllTime);
    let table = engine.pivot(&all_time).unwrap();
    assert_eq!(table.rows[0].label, "Unknown");
    assert_eq!(table.rows[0].total, 540.0);
}

#[test]
fn test_member_metrics_by_category() {
    let file = write_csv(STUDIO_CSV);
    let loaded = CsvRecordLoader::new(file.path()).load().unwrap();
    let engine = PivotEngine::new(&loaded.records);
    let config = PivotConfig::new(Dimension::Category, Metric::Members, jan_feb());

    let tables = engine
        .pivot_metrics(&[Metric::Members, Metric::SessionsPerMember], &config)
        .unwrap();
    assert_eq!(tables[0].row("Yoga").unwrap().total, 2.0);
    assert_close(tables[1].row("Yoga").unwrap().total, 9.0);
}

#[test]
fn test_console_report_renders() {
    let file = write_csv(STUDIO_CSV);
    let loaded = CsvRecordLoader::new(file.path()).load().unwrap();
    let config = PivotConfig::new(Dimension::Category, Metric::Revenue, jan_feb());
    let table = PivotEngine::new(&loaded.records).pivot(&config).unwrap();

    let output = ReportFormatter::format_pivot(&table, &OutputFormat::Console).unwrap();
    assert!(output.contains("Revenue by Category"));
    assert!(output.contains("Records: 6 (1 undated)"));
    assert!(output.contains("+180.0%"));
}

#[test]
fn test_binary_pivot_json() {
    let file = write_csv(STUDIO_CSV);
    let output = Command::new(env!("CARGO_BIN_EXE_sales-analytics"))
        .args([
            "pivot",
            "--csv-path",
            file.path().to_str().unwrap(),
            "--dimension",
            "category",
            "--metric",
            "revenue",
            "--from",
            "2024-01",
            "--to",
            "2024-02",
            "--format",
            "json",
        ])
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["rows"][0]["label"], "Yoga");
    assert_eq!(json["grand_total"]["total"], 470.0);
}

#[test]
fn test_binary_rejects_missing_file() {
    let output = Command::new(env!("CARGO_BIN_EXE_sales-analytics"))
        .args(["pivot", "--csv-path", "/nonexistent/records.csv"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("CSV file does not exist"));
}

#[test]
fn test_binary_pivot_console_includes_dataset_overview() {
    let file = write_csv(STUDIO_CSV);
    let output = Command::new(env!("CARGO_BIN_EXE_sales-analytics"))
        .args([
            "pivot",
            "--csv-path",
            file.path().to_str().unwrap(),
            "--from",
            "2024-01",
            "--to",
            "2024-02",
        ])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Records: 6 (5 dated, 1 undated)"));
    assert!(stdout.contains("Grand Total"));
    assert!(stdout.contains("vs year"));
}
