//! Common Test Utilities
//!
//! Shared fixtures used by the unit and integration harnesses.

#![allow(dead_code)]

use sales_analytics::types::{BucketSequence, Record, TimeBucket};
use std::io::Write;
use tempfile::NamedTempFile;

/// A studio export with comment lines, aliases and a few awkward rows
pub const STUDIO_CSV: &str = "\
# Studio payments export
# generated for tests
Payment Date,Payment Value,Member ID,Customer Email,Category,Product,Trainer,Quantity,Discount Amount,Discount Percentage,Sessions Used
05/01/2024,100,M1,m1@studio.test,Yoga,10 Class Pack,Sam,1,0,0,4
20/01/2024,50,M2,m2@studio.test,Pilates,Drop In,Alex,1,10,16.67,1
03/02/2024,200,M1,m1@studio.test,Yoga,Monthly Unlimited,Sam,1,0,0,12
14/02/2024,80,,m3@studio.test,Yoga,Drop In,Alex,2,20,20,2
28/02/2024,40,M2,m2@studio.test,Pilates,Drop In,,1,0,0,1
not recorded,500,M4,,Retail,Mat,,1,0,0,0
";

/// Write `content` to a temporary CSV file
pub fn write_csv(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// Oldest-first buckets from `(year, month)` pairs
pub fn buckets(months: &[(i32, u32)]) -> BucketSequence {
    BucketSequence::oldest_first(
        months
            .iter()
            .map(|(year, month)| TimeBucket::new(*year, *month).unwrap())
            .collect(),
    )
}

/// A sale in `category` with an identity
pub fn sale(date: &str, amount: f64, category: &str, member: &str) -> Record {
    Record::new(date, amount)
        .with_key("category", category)
        .with_identity(member)
}

/// Approximate float equality for derived metrics
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
