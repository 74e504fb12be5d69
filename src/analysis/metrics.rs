//! Metric evaluator
//!
//! A metric is never derived from other finished metric values. Records are
//! folded into [`MetricComponents`] (raw sums, counts, distinct identities,
//! purchase dates) and every metric is read off the components. Rolling up
//! two partial aggregates therefore means merging components, which keeps
//! ratio-of-sums and distinct-count metrics exact at every level.

use super::sequence::{self, PurchaseDates};
use crate::types::{Metric, Record};
use crate::utils::math::{finite_or_zero, safe_percentage, safe_ratio};
use std::collections::HashSet;

/// Raw numerators and denominators for every supported metric
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricComponents {
    pub revenue: f64,
    pub transactions: usize,
    pub units: f64,
    pub vat: f64,
    pub discount_amount: f64,
    pub discount_percentage_sum: f64,
    pub discounted_transactions: usize,
    pub sessions_used: f64,
    identities: HashSet<String>,
    purchase_dates: PurchaseDates,
}

impl MetricComponents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut components = Self::new();
        for record in records {
            components.add(record);
        }
        components
    }

    pub fn add(&mut self, record: &Record) {
        self.revenue += record.amount;
        self.transactions += 1;
        self.units += record.units;
        self.vat += record.vat;
        self.discount_amount += record.discount_amount;
        if record.is_discounted() {
            self.discount_percentage_sum += record.discount_percentage;
            self.discounted_transactions += 1;
        }
        self.sessions_used += record.sessions_used;
        self.identities.insert(record.identity.clone());
        if let Some(date) = record.date {
            self.purchase_dates
                .entry(record.identity.clone())
                .or_default()
                .push(date);
        }
    }

    /// Combine two partial aggregates
    pub fn merge(&mut self, other: &MetricComponents) {
        self.revenue += other.revenue;
        self.transactions += other.transactions;
        self.units += other.units;
        self.vat += other.vat;
        self.discount_amount += other.discount_amount;
        self.discount_percentage_sum += other.discount_percentage_sum;
        self.discounted_transactions += other.discounted_transactions;
        self.sessions_used += other.sessions_used;
        self.identities.extend(other.identities.iter().cloned());
        for (identity, dates) in &other.purchase_dates {
            self.purchase_dates
                .entry(identity.clone())
                .or_default()
                .extend(dates.iter().copied());
        }
    }

    pub fn distinct_identities(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions == 0
    }

    /// Read one metric off the components; always finite, 0.0 on empty input
    pub fn value(&self, metric: Metric) -> f64 {
        let transactions = self.transactions as f64;
        let members = self.identities.len() as f64;

        let value = match metric {
            Metric::Revenue => self.revenue,
            Metric::Transactions => transactions,
            Metric::Units => self.units,
            Metric::Vat => self.vat,
            Metric::DiscountValue => self.discount_amount,
            Metric::Members => members,
            Metric::Atv => safe_ratio(self.revenue, transactions),
            Metric::Auv => safe_ratio(self.revenue, self.units),
            Metric::Upt => safe_ratio(self.units, transactions),
            Metric::DiscountPercentage => safe_ratio(
                self.discount_percentage_sum,
                self.discounted_transactions as f64,
            ),
            Metric::DiscountRate => {
                safe_percentage(self.discount_amount, self.revenue + self.discount_amount)
            }
            Metric::RevenuePerMember => safe_ratio(self.revenue, members),
            Metric::SessionsPerMember => safe_ratio(self.sessions_used, members),
            Metric::RepeatRate => safe_percentage(
                sequence::repeat_identity_count(&self.purchase_dates) as f64,
                members,
            ),
            Metric::PurchaseFrequency => sequence::purchase_frequency(&self.purchase_dates),
            Metric::CustomerLifespan => sequence::customer_lifespan(&self.purchase_dates),
            Metric::DaysToSecondPurchase => {
                sequence::days_to_second_purchase(&self.purchase_dates)
            }
        };
        finite_or_zero(value)
    }
}

/// Evaluate `metric` over a record set
pub fn evaluate(metric: Metric, records: &[&Record]) -> f64 {
    MetricComponents::from_records(records.iter().copied()).value(metric)
}

/// Evaluate `metric` over owned records
pub fn evaluate_owned(metric: Metric, records: &[Record]) -> f64 {
    MetricComponents::from_records(records).value(metric)
}
