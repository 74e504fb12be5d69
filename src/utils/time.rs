//! Date utilities for monthly bucket analysis
//!
//! Normalises the date strings found in payment exports and provides the
//! calendar-month arithmetic used to build pivot columns.

use crate::types::TimeBucket;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;

/// Trailing window used by the dashboards when no range is given
pub const DEFAULT_WINDOW_MONTHS: u32 = 22;

lazy_static! {
    /// `DD/MM/YYYY`, optionally followed by a time part (`15/03/2024 10:30:00`,
    /// `15/03/2024, 10:30`, `15/03/2024T10:30`)
    static ref DAY_MONTH_YEAR: Regex =
        Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})(?:[ ,T].*)?$").expect("valid regex");
}

/// Date-only layouts tried after the strict day/month/year pattern
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
];

/// Date-time layouts without an offset
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Normalise a raw date string into a calendar date
///
/// `DD/MM/YYYY` is matched first so that day and month are never swapped the
/// way a US-style parser would. A string that matches the pattern but names an
/// impossible date yields `None` rather than falling through to the general
/// parsers. Returns `None` for anything unparseable; never panics.
///
/// # Examples
/// ```
/// use sales_analytics::utils::time::normalize_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(normalize_date("15/03/2024"), NaiveDate::from_ymd_opt(2024, 3, 15));
/// assert_eq!(normalize_date("2024-03-15"), NaiveDate::from_ymd_opt(2024, 3, 15));
/// assert_eq!(normalize_date("31/02/2024"), None);
/// assert_eq!(normalize_date("not a date"), None);
/// ```
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Some(caps) = DAY_MONTH_YEAR.captures(trimmed) {
        let day: u32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let year: i32 = caps[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }

    parse_general(trimmed)
}

fn parse_general(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(value) {
        return Some(dt.date_naive());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt.date());
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
}

/// Shift a (year, month) pair by `delta` months, month being 1-based
///
/// # Examples
/// ```
/// use sales_analytics::utils::time::shift_month;
/// assert_eq!(shift_month(2024, 1, -1), (2023, 12));
/// assert_eq!(shift_month(2024, 11, 3), (2025, 2));
/// ```
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let index = year * 12 + (month as i32 - 1) + delta;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Contiguous month buckets ending with the month of `reference`, oldest first
///
/// The reference date is supplied by the caller so a computation pass sees
/// one fixed window even if the wall clock crosses a month boundary.
pub fn trailing_months(reference: NaiveDate, months: u32) -> Vec<TimeBucket> {
    (0..months as i32)
        .rev()
        .filter_map(|back| {
            let (year, month) = shift_month(reference.year(), reference.month(), -back);
            TimeBucket::new(year, month)
        })
        .collect()
}

/// Contiguous month buckets from the month of `start` to the month of `end`
/// inclusive, oldest first. Empty when `start` is after `end`.
pub fn months_between(start: NaiveDate, end: NaiveDate) -> Vec<TimeBucket> {
    let first = start.year() * 12 + start.month0() as i32;
    let last = end.year() * 12 + end.month0() as i32;
    if first > last {
        return Vec::new();
    }
    (0..=(last - first))
        .filter_map(|offset| {
            let (year, month) = shift_month(start.year(), start.month(), offset);
            TimeBucket::new(year, month)
        })
        .collect()
}

/// Parse a `YYYY-MM` month key
pub fn parse_month_key(key: &str) -> Option<TimeBucket> {
    let (year, month) = key.trim().split_once('-')?;
    TimeBucket::new(year.parse().ok()?, month.parse().ok()?)
}

/// Whole days from `earlier` to `later` (negative if reversed)
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}
