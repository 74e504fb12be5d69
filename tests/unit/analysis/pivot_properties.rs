//! Pivot assembly properties
//!
//! Partition conservation, ordering, recomputed totals and window handling.

use sales_analytics::analysis::{build_pivot, PivotConfig, PivotEngine, GRAND_TOTAL_LABEL};
use sales_analytics::types::{Dimension, Metric, Record, TotalScope};

use crate::common::{assert_close, buckets, sale};

fn jan_feb_mar() -> sales_analytics::types::BucketSequence {
    buckets(&[(2024, 1), (2024, 2), (2024, 3)])
}

fn mixed_records() -> Vec<Record> {
    vec![
        sale("05/01/2024", 120.0, "Yoga", "m1").with_key("trainer", "Sam"),
        sale("09/01/2024", 80.0, "Pilates", "m2").with_key("trainer", "Alex"),
        sale("12/02/2024", 60.0, "Yoga", "m3"),
        sale("15/03/2024", 300.0, " ", "m1").with_key("trainer", "Sam"),
        sale("garbage", 45.0, "Barre", "m4").with_key("trainer", "Alex"),
        Record::new("20/03/2024", 10.0),
    ]
}

#[test]
fn test_revenue_pivot_two_categories() {
    let records = vec![
        sale("01/01/2024", 100.0, "A", "m1"),
        sale("01/02/2024", 200.0, "A", "m2"),
        sale("01/01/2024", 50.0, "B", "m3"),
    ];
    let config = PivotConfig::new(
        Dimension::Category,
        Metric::Revenue,
        buckets(&[(2024, 1), (2024, 2)]),
    );
    let table = build_pivot(&records, &config);

    let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["A", "B"]);
    assert_eq!(table.value("A", "2024-01"), Some(100.0));
    assert_eq!(table.value("A", "2024-02"), Some(200.0));
    assert_eq!(table.row("A").unwrap().total, 300.0);
    assert_eq!(table.value("B", "2024-01"), Some(50.0));
    assert_eq!(table.value("B", "2024-02"), Some(0.0));
    assert_eq!(table.row("B").unwrap().total, 50.0);

    let grand = table.grand_total.as_ref().unwrap();
    assert_eq!(grand.label, GRAND_TOTAL_LABEL);
    assert_eq!(grand.values, vec![150.0, 200.0]);
    assert_eq!(grand.total, 350.0);
}

#[test]
fn test_partition_conservation_across_dimensions() {
    let records = mixed_records();
    for dimension in [
        Dimension::Category,
        Dimension::Trainer,
        Dimension::Location,
        Dimension::Custom("membership_tier".to_string()),
    ] {
        let config = PivotConfig::new(dimension.clone(), Metric::Transactions, jan_feb_mar());
        let table = build_pivot(&records, &config);
        let counted: usize = table.rows.iter().map(|r| r.record_count).sum();
        assert_eq!(counted, records.len(), "dimension {}", dimension);
    }
}

#[test]
fn test_blank_and_missing_values_share_fallback_row() {
    let records = mixed_records();
    let config = PivotConfig::new(Dimension::Category, Metric::Revenue, jan_feb_mar())
        .with_fallback_label("Uncategorized");
    let table = build_pivot(&records, &config);

    let fallback = table.row("Uncategorized").unwrap();
    assert_eq!(fallback.record_count, 2);
    assert_eq!(fallback.total, 310.0);
}

#[test]
fn test_grand_total_atv_differs_from_naive_average() {
    // Row ATVs: A = 1000 / 1, B = 100 / 9 ≈ 11.1; naive mean ≈ 505.6
    let mut records = vec![sale("02/01/2024", 1000.0, "A", "m1")];
    for day in 1..=9 {
        records.push(sale(&format!("{:02}/01/2024", day), 100.0 / 9.0, "B", "m2"));
    }
    let config = PivotConfig::new(Dimension::Category, Metric::Atv, jan_feb_mar());
    let table = build_pivot(&records, &config);

    let naive: f64 = table.rows.iter().map(|r| r.total).sum::<f64>() / table.rows.len() as f64;
    let grand = table.grand_total.unwrap();
    assert_close(grand.total, 1100.0 / 10.0);
    assert!((grand.total - naive).abs() > 1.0);
}

#[test]
fn test_rows_sorted_descending_with_stable_ties() {
    let records = vec![
        sale("01/01/2024", 10.0, "First", "m1"),
        sale("01/01/2024", 99.0, "Big", "m2"),
        sale("01/01/2024", 10.0, "Second", "m3"),
        sale("01/01/2024", 10.0, "Third", "m4"),
    ];
    let config = PivotConfig::new(Dimension::Category, Metric::Revenue, jan_feb_mar());
    let table = build_pivot(&records, &config);
    let labels: Vec<&str> = table.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["Big", "First", "Second", "Third"]);
}

#[test]
fn test_two_level_children_partition_parent() {
    let records = mixed_records();
    let config = PivotConfig::new(Dimension::Category, Metric::Revenue, jan_feb_mar())
        .with_sub_dimension(Dimension::Trainer);
    let table = build_pivot(&records, &config);

    for row in &table.rows {
        let child_count: usize = row.children.iter().map(|c| c.record_count).sum();
        assert_eq!(child_count, row.record_count, "row {}", row.label);
    }
    let yoga = table.row("Yoga").unwrap();
    assert_eq!(yoga.child("Sam").unwrap().total, 120.0);
    assert_eq!(yoga.child("Unknown").unwrap().total, 60.0);
}

#[test]
fn test_all_time_totals_include_undated_records() {
    let records = mixed_records();
    let window = PivotConfig::new(Dimension::Trainer, Metric::Revenue, jan_feb_mar());
    let table = build_pivot(&records, &window);
    assert_eq!(table.row("Alex").unwrap().total, 80.0);
    assert_eq!(table.grand_total.as_ref().unwrap().total, 570.0);
    assert_eq!(table.undated_count, 1);

    let all_time = window.with_total_scope(TotalScope::AllTime);
    let table = build_pivot(&records, &all_time);
    assert_eq!(table.row("Alex").unwrap().total, 125.0);
    assert_eq!(table.grand_total.as_ref().unwrap().total, 615.0);
}

#[test]
fn test_purchase_frequency_cell() {
    let records = vec![
        sale("01/01/2024", 10.0, "Yoga", "m1"),
        sale("11/01/2024", 10.0, "Yoga", "m1"),
        sale("31/01/2024", 10.0, "Yoga", "m1"),
    ];
    let config = PivotConfig::new(Dimension::Category, Metric::PurchaseFrequency, jan_feb_mar());
    let table = build_pivot(&records, &config);
    assert_eq!(table.value("Yoga", "2024-01"), Some(15.0));
    assert_eq!(table.value("Yoga", "2024-02"), Some(0.0));
    assert_eq!(table.row("Yoga").unwrap().total, 15.0);
}

#[test]
fn test_pivot_is_pure() {
    let records = mixed_records();
    let before = records.clone();
    let engine = PivotEngine::new(&records);
    let config = PivotConfig::new(Dimension::Category, Metric::RepeatRate, jan_feb_mar());

    let first = engine.pivot(&config).unwrap();
    let second = engine.pivot(&config).unwrap();
    assert_eq!(first, second);
    assert_eq!(records, before);
}

#[test]
fn test_newest_first_reverses_columns_only() {
    let records = mixed_records();
    let oldest = PivotConfig::new(Dimension::Category, Metric::Revenue, jan_feb_mar());
    let newest = PivotConfig::new(Dimension::Category, Metric::Revenue, jan_feb_mar().reversed());

    let a = build_pivot(&records, &oldest);
    let b = build_pivot(&records, &newest);
    for (row_a, row_b) in a.rows.iter().zip(b.rows.iter()) {
        assert_eq!(row_a.label, row_b.label);
        assert_eq!(row_a.total, row_b.total);
        let mut reversed = row_b.values.clone();
        reversed.reverse();
        assert_eq!(row_a.values, reversed);
    }
}
