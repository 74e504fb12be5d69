//! CSV export round trip
//!
//! Exports pivot tables to a temporary directory and reads them back with a
//! comment-aware CSV reader.

use csv::ReaderBuilder;
use sales_analytics::analysis::reports::csv_export::export_tables;
use sales_analytics::analysis::{PivotConfig, PivotEngine};
use sales_analytics::processor::CsvRecordLoader;
use sales_analytics::types::{Dimension, Metric};
use std::fs;

use crate::common::{buckets, write_csv, STUDIO_CSV};

fn read_rows(path: &std::path::Path) -> (Vec<String>, Vec<Vec<String>>) {
    let mut reader = ReaderBuilder::new()
        .comment(Some(b'#'))
        .has_headers(true)
        .from_path(path)
        .unwrap();
    let headers = reader.headers().unwrap().iter().map(String::from).collect();
    let rows = reader
        .records()
        .map(|r| r.unwrap().iter().map(String::from).collect())
        .collect();
    (headers, rows)
}

#[test]
fn test_export_revenue_and_atv() {
    let file = write_csv(STUDIO_CSV);
    let loaded = CsvRecordLoader::new(file.path()).load().unwrap();
    let config = PivotConfig::new(
        Dimension::Category,
        Metric::Revenue,
        buckets(&[(2024, 1), (2024, 2)]),
    );
    let tables = PivotEngine::new(&loaded.records)
        .pivot_metrics(&[Metric::Revenue, Metric::Atv], &config)
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let paths = export_tables(&tables, dir.path()).unwrap();
    assert_eq!(paths.len(), 2);
    assert!(paths[0].ends_with("category_revenue.csv"));
    assert!(paths[1].ends_with("category_atv.csv"));

    let (headers, rows) = read_rows(&paths[0]);
    assert_eq!(headers, vec!["Label", "Jan 2024", "Feb 2024", "Total"]);
    assert_eq!(rows[0], vec!["Yoga", "100", "280", "380"]);
    assert_eq!(rows.last().unwrap(), &vec!["Grand Total", "150", "320", "470"]);

    let (_, rows) = read_rows(&paths[1]);
    assert_eq!(rows[0], vec!["Yoga", "100", "140", "126.67"]);
    assert_eq!(rows.last().unwrap(), &vec!["Grand Total", "75", "106.67", "94"]);

    let raw = fs::read_to_string(&paths[1]).unwrap();
    assert!(raw.starts_with("# table: Average Transaction Value by Category\n"));
    assert!(raw.contains("# undated_records: 1\n"));
}

#[test]
fn test_export_two_level_table() {
    let file = write_csv(STUDIO_CSV);
    let loaded = CsvRecordLoader::new(file.path()).load().unwrap();
    let config = PivotConfig::new(
        Dimension::Category,
        Metric::Transactions,
        buckets(&[(2024, 1), (2024, 2)]),
    )
    .with_sub_dimension(Dimension::Product)
    .with_grand_total(false);
    let table = PivotEngine::new(&loaded.records).pivot(&config).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let paths = export_tables(&[table], &dir.path().join("nested")).unwrap();
    assert!(paths[0].ends_with("category_product_transactions.csv"));

    let (headers, rows) = read_rows(&paths[0]);
    assert_eq!(headers[1], "Parent");
    assert_eq!(rows[0], vec!["Yoga", "", "1", "2", "3"]);
    // Children of Yoga follow it, each naming Yoga as parent
    assert!(rows[1..4].iter().all(|r| r[1] == "Yoga"));
    assert!(rows.iter().all(|r| r[0] != "Grand Total"));
}
