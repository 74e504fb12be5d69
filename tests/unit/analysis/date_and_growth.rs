//! Date normalisation and growth sentinels

use chrono::NaiveDate;
use sales_analytics::analysis::growth::{growth, Growth};
use sales_analytics::types::{BucketSequence, TimeBucket};
use sales_analytics::utils::time::{normalize_date, trailing_months};

#[test]
fn test_day_month_year_is_not_swapped() {
    assert_eq!(
        normalize_date("15/03/2024"),
        NaiveDate::from_ymd_opt(2024, 3, 15)
    );
    assert_eq!(
        normalize_date("04/05/2024"),
        NaiveDate::from_ymd_opt(2024, 5, 4)
    );
    assert_eq!(
        normalize_date("15/03/2024 18:45:00"),
        NaiveDate::from_ymd_opt(2024, 3, 15)
    );
}

#[test]
fn test_other_layouts_and_garbage() {
    assert_eq!(
        normalize_date("2024-03-15T09:00:00Z"),
        NaiveDate::from_ymd_opt(2024, 3, 15)
    );
    assert_eq!(normalize_date("13/13/2024"), None);
    assert_eq!(normalize_date(""), None);
    assert_eq!(normalize_date("soon"), None);
}

#[test]
fn test_growth_sentinels() {
    assert_eq!(growth(0.0, 0.0), Growth::Undefined);
    assert_eq!(growth(0.0, 0.0).display(), "—");
    assert_eq!(growth(100.0, 0.0), Growth::FromZero);
    assert_eq!(growth(100.0, 0.0).display(), "+100%");
    assert_eq!(growth(120.0, 100.0).display(), "+20.0%");
    assert_eq!(growth(75.0, 100.0).display(), "-25.0%");
}

#[test]
fn test_trailing_window_crosses_year_boundary() {
    let reference = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
    let sequence = BucketSequence::oldest_first(trailing_months(reference, 4));
    let keys: Vec<&str> = sequence.iter().map(|b| b.key.as_str()).collect();
    assert_eq!(keys, vec!["2023-11", "2023-12", "2024-01", "2024-02"]);
    assert_eq!(sequence.buckets()[2].display, "Jan 2024");

    let jan = sequence.position_of("2024-01").unwrap();
    assert_eq!(sequence.previous_index(jan), sequence.position_of("2023-12"));
    assert_eq!(sequence.previous_index(0), None);
    assert_eq!(
        sequence.bucket_for(NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()),
        Some(1)
    );
    assert_eq!(TimeBucket::new(2024, 13), None);
}
