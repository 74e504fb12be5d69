//! Metric evaluator properties across every metric

use sales_analytics::analysis::metrics::{evaluate, MetricComponents};
use sales_analytics::analysis::{build_pivot, PivotConfig};
use sales_analytics::types::{Dimension, Metric, MetricClass, Record};

use crate::common::{assert_close, buckets, sale};

fn records() -> Vec<Record> {
    vec![
        sale("03/01/2024", 120.0, "Yoga", "m1")
            .with_units(2.0)
            .with_vat(20.0)
            .with_sessions_used(8.0),
        sale("17/01/2024", 45.0, "Yoga", "m2").with_discount(5.0, 10.0),
        sale("02/02/2024", 60.0, "Pilates", "m1").with_units(3.0),
        sale("21/02/2024", 90.0, "Pilates", "m3").with_discount(10.0, 10.0),
        sale("28/02/2024", 30.0, "Yoga", "m2"),
    ]
}

#[test]
fn test_every_metric_is_zero_on_empty_input() {
    for metric in Metric::ALL {
        assert_eq!(evaluate(metric, &[]), 0.0, "metric {}", metric);
    }
}

#[test]
fn test_every_metric_is_finite() {
    let records = records();
    let components = MetricComponents::from_records(&records);
    for metric in Metric::ALL {
        assert!(components.value(metric).is_finite(), "metric {}", metric);
    }
}

#[test]
fn test_additive_metrics_sum_across_rows() {
    let records = records();
    for metric in Metric::ALL
        .into_iter()
        .filter(|m| m.class() == MetricClass::Additive)
    {
        let config = PivotConfig::new(
            Dimension::Category,
            metric,
            buckets(&[(2024, 1), (2024, 2)]),
        );
        let table = build_pivot(&records, &config);
        let row_sum: f64 = table.rows.iter().map(|r| r.total).sum();
        assert_close(table.grand_total.unwrap().total, row_sum);
    }
}

#[test]
fn test_distinct_members_do_not_sum() {
    let records = records();
    let config = PivotConfig::new(
        Dimension::Category,
        Metric::Members,
        buckets(&[(2024, 1), (2024, 2)]),
    );
    let table = build_pivot(&records, &config);

    // m1 and m2 appear under Yoga, m1 and m3 under Pilates
    assert_eq!(table.row("Yoga").unwrap().total, 2.0);
    assert_eq!(table.row("Pilates").unwrap().total, 2.0);
    assert_eq!(table.grand_total.unwrap().total, 3.0);
}

#[test]
fn test_ratio_metrics_on_fixture() {
    let records = records();
    let refs: Vec<&Record> = records.iter().collect();

    // 345 revenue, 5 transactions, 8 units
    assert_close(evaluate(Metric::Atv, &refs), 69.0);
    assert_close(evaluate(Metric::Auv, &refs), 345.0 / 8.0);
    assert_close(evaluate(Metric::Upt, &refs), 1.6);
    assert_close(evaluate(Metric::RevenuePerMember, &refs), 115.0);
    assert_close(evaluate(Metric::DiscountPercentage, &refs), 10.0);
    assert_close(evaluate(Metric::DiscountRate, &refs), 15.0 / 360.0 * 100.0);
    // m1 and m2 bought twice, m3 once
    assert_close(evaluate(Metric::RepeatRate, &refs), 2.0 / 3.0 * 100.0);
}

#[test]
fn test_sequence_metrics_on_fixture() {
    let records = records();
    let refs: Vec<&Record> = records.iter().collect();

    // m1: 03/01 -> 02/02 = 30 days; m2: 17/01 -> 28/02 = 42 days
    assert_close(evaluate(Metric::PurchaseFrequency, &refs), 36.0);
    assert_close(evaluate(Metric::CustomerLifespan, &refs), 36.0);
    assert_close(evaluate(Metric::DaysToSecondPurchase, &refs), 36.0);
}
