//! Calendar-month time buckets used as pivot columns

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// One calendar month
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TimeBucket {
    /// `YYYY-MM`
    pub key: String,
    /// `Mon YYYY`
    pub display: String,
    pub year: i32,
    /// 1-based
    pub month: u32,
}

impl TimeBucket {
    /// `None` if `month` is outside 1..=12
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if !(1..=12).contains(&month) {
            return None;
        }
        Some(Self {
            key: format!("{:04}-{:02}", year, month),
            display: format!("{} {}", MONTH_ABBREVIATIONS[month as usize - 1], year),
            year,
            month,
        })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        let month = date.month();
        Self {
            key: format!("{:04}-{:02}", date.year(), month),
            display: format!("{} {}", MONTH_ABBREVIATIONS[month as usize - 1], date.year()),
            year: date.year(),
            month,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Months since year 0, used for chronological comparisons
    pub fn ordinal(&self) -> i32 {
        self.year * 12 + self.month as i32 - 1
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

impl PartialOrd for TimeBucket {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimeBucket {
    fn cmp(&self, other: &Self) -> Ordering {
        self.ordinal().cmp(&other.ordinal())
    }
}

/// Column order of a bucket sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BucketOrder {
    #[default]
    OldestFirst,
    NewestFirst,
}

/// A fixed, contiguous run of month buckets
///
/// Built once per computation pass; the pivot assembler never re-derives it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BucketSequence {
    buckets: Vec<TimeBucket>,
    order: BucketOrder,
}

impl BucketSequence {
    /// Wrap chronologically ordered (oldest first) buckets
    pub fn oldest_first(mut buckets: Vec<TimeBucket>) -> Self {
        buckets.sort();
        buckets.dedup();
        Self {
            buckets,
            order: BucketOrder::OldestFirst,
        }
    }

    /// Same buckets in the opposite order, no calendar recomputation
    pub fn reversed(&self) -> Self {
        let mut buckets = self.buckets.clone();
        buckets.reverse();
        Self {
            buckets,
            order: match self.order {
                BucketOrder::OldestFirst => BucketOrder::NewestFirst,
                BucketOrder::NewestFirst => BucketOrder::OldestFirst,
            },
        }
    }

    pub fn with_order(self, order: BucketOrder) -> Self {
        if self.order == order {
            self
        } else {
            self.reversed()
        }
    }

    pub fn order(&self) -> BucketOrder {
        self.order
    }

    pub fn buckets(&self) -> &[TimeBucket] {
        &self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimeBucket> {
        self.buckets.iter()
    }

    /// Iterate oldest to newest regardless of display order
    pub fn chronological(&self) -> Box<dyn Iterator<Item = &TimeBucket> + '_> {
        match self.order {
            BucketOrder::OldestFirst => Box::new(self.buckets.iter()),
            BucketOrder::NewestFirst => Box::new(self.buckets.iter().rev()),
        }
    }

    /// First day of the earliest month in the window
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.buckets.iter().min()?.first_day()
    }

    /// Last day of the latest month in the window
    pub fn last_date(&self) -> Option<NaiveDate> {
        let latest = self.buckets.iter().max()?;
        let (year, month) = if latest.month == 12 {
            (latest.year + 1, 1)
        } else {
            (latest.year, latest.month + 1)
        };
        NaiveDate::from_ymd_opt(year, month, 1)?.pred_opt()
    }

    pub fn position_of(&self, key: &str) -> Option<usize> {
        self.buckets.iter().position(|b| b.key == key)
    }

    /// Column index of the bucket containing `date`
    pub fn bucket_for(&self, date: NaiveDate) -> Option<usize> {
        let ordinal = date.year() * 12 + date.month0() as i32;
        self.buckets.iter().position(|b| b.ordinal() == ordinal)
    }

    /// Whether `date` falls inside any bucket of the window
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.bucket_for(date).is_some()
    }

    /// Column index of the chronologically preceding bucket, if it is in the window
    pub fn previous_index(&self, index: usize) -> Option<usize> {
        let bucket = self.buckets.get(index)?;
        let target = bucket.ordinal() - 1;
        self.buckets.iter().position(|b| b.ordinal() == target)
    }

    /// Column index of the same month one year earlier, if it is in the window
    pub fn year_ago_index(&self, index: usize) -> Option<usize> {
        let bucket = self.buckets.get(index)?;
        let target = bucket.ordinal() - 12;
        self.buckets.iter().position(|b| b.ordinal() == target)
    }

    /// Column index of the most recent bucket
    pub fn latest_index(&self) -> Option<usize> {
        match self.order {
            BucketOrder::OldestFirst => self.buckets.len().checked_sub(1),
            BucketOrder::NewestFirst => (!self.buckets.is_empty()).then_some(0),
        }
    }
}

impl<'a> IntoIterator for &'a BucketSequence {
    type Item = &'a TimeBucket;
    type IntoIter = std::slice::Iter<'a, TimeBucket>;

    fn into_iter(self) -> Self::IntoIter {
        self.buckets.iter()
    }
}
