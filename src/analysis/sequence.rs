//! Sequence-derived metrics
//!
//! Each identity's purchase dates are sorted ascending and reduced to one
//! number; the metric is the mean of those numbers over identities with at
//! least two dated purchases. Identities with a single purchase are left out
//! of the denominator entirely.

use crate::utils::math::mean;
use crate::utils::time::days_between;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Purchase dates keyed by identity
pub type PurchaseDates = BTreeMap<String, Vec<NaiveDate>>;

/// Mean gap in days between consecutive purchases, averaged per identity first
pub fn purchase_frequency(dates: &PurchaseDates) -> f64 {
    average_over_repeat_identities(dates, |sorted| {
        let gaps: Vec<f64> = sorted
            .windows(2)
            .map(|pair| days_between(pair[0], pair[1]) as f64)
            .collect();
        mean(&gaps)
    })
}

/// Days from first to last purchase
pub fn customer_lifespan(dates: &PurchaseDates) -> f64 {
    average_over_repeat_identities(dates, |sorted| {
        days_between(sorted[0], sorted[sorted.len() - 1]) as f64
    })
}

/// Days from first to second purchase
pub fn days_to_second_purchase(dates: &PurchaseDates) -> f64 {
    average_over_repeat_identities(dates, |sorted| days_between(sorted[0], sorted[1]) as f64)
}

/// Identities with at least two dated purchases
pub fn repeat_identity_count(dates: &PurchaseDates) -> usize {
    dates.values().filter(|d| d.len() >= 2).count()
}

/// Apply `per_identity` to each identity's sorted dates (only identities with
/// two or more) and average the results; 0.0 when none qualify
fn average_over_repeat_identities<F>(dates: &PurchaseDates, per_identity: F) -> f64
where
    F: Fn(&[NaiveDate]) -> f64,
{
    let values: Vec<f64> = dates
        .values()
        .filter(|d| d.len() >= 2)
        .map(|d| {
            let mut sorted = d.clone();
            sorted.sort_unstable();
            per_identity(&sorted)
        })
        .collect();
    mean(&values)
}
