//! Transaction record - the unit of input for every pivot computation

use crate::utils::math::finite_or_zero;
use crate::utils::time::normalize_date;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identity used when neither a member id nor an email is available
pub const UNKNOWN_IDENTITY: &str = "unknown";

/// A flat sale/payment record
///
/// The date is normalised once at construction. Records whose date could not
/// be parsed keep `date = None` and are skipped by every bucketed computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub date: Option<NaiveDate>,
    pub raw_date: String,
    pub group_keys: BTreeMap<String, String>,
    pub amount: f64,
    pub identity: String,
    pub units: f64,
    pub discount_amount: f64,
    pub discount_percentage: f64,
    pub vat: f64,
    pub sessions_used: f64,
}

impl Record {
    pub fn new(raw_date: &str, amount: f64) -> Self {
        Self {
            date: normalize_date(raw_date),
            raw_date: raw_date.to_string(),
            group_keys: BTreeMap::new(),
            amount: finite_or_zero(amount),
            identity: UNKNOWN_IDENTITY.to_string(),
            units: 1.0,
            discount_amount: 0.0,
            discount_percentage: 0.0,
            vat: 0.0,
            sessions_used: 0.0,
        }
    }

    /// Set a dimension value; the dimension name is normalised
    pub fn with_key(mut self, dimension: &str, value: &str) -> Self {
        self.group_keys
            .insert(normalize_dimension_name(dimension), value.to_string());
        self
    }

    pub fn with_identity(mut self, identity: &str) -> Self {
        self.identity = resolve_identity(Some(identity), None);
        self
    }

    /// Set identity from member id with email fallback
    pub fn with_member(mut self, member_id: Option<&str>, email: Option<&str>) -> Self {
        self.identity = resolve_identity(member_id, email);
        self
    }

    pub fn with_units(mut self, units: f64) -> Self {
        self.units = finite_or_zero(units);
        self
    }

    pub fn with_discount(mut self, amount: f64, percentage: f64) -> Self {
        self.discount_amount = finite_or_zero(amount);
        self.discount_percentage = finite_or_zero(percentage);
        self
    }

    pub fn with_vat(mut self, vat: f64) -> Self {
        self.vat = finite_or_zero(vat);
        self
    }

    pub fn with_sessions_used(mut self, sessions: f64) -> Self {
        self.sessions_used = finite_or_zero(sessions);
        self
    }

    /// Trimmed value for `dimension`, `None` if absent or blank
    pub fn group_value(&self, dimension: &str) -> Option<&str> {
        self.group_keys
            .get(dimension)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
    }

    pub fn is_dated(&self) -> bool {
        self.date.is_some()
    }

    /// A record counts as discounted if either discount field is set
    pub fn is_discounted(&self) -> bool {
        self.discount_amount > 0.0 || self.discount_percentage > 0.0
    }
}

/// Member id, else email, else [`UNKNOWN_IDENTITY`]
///
/// # Examples
/// ```
/// use sales_analytics::types::resolve_identity;
/// assert_eq!(resolve_identity(Some("M-1"), Some("a@b.c")), "M-1");
/// assert_eq!(resolve_identity(Some(" "), Some("a@b.c")), "a@b.c");
/// assert_eq!(resolve_identity(None, None), "unknown");
/// ```
pub fn resolve_identity(member_id: Option<&str>, email: Option<&str>) -> String {
    [member_id, email]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|v| !v.is_empty())
        .unwrap_or(UNKNOWN_IDENTITY)
        .to_string()
}

/// Normalise a column or dimension name: trim, lowercase, spaces and dashes
/// become underscores
///
/// # Examples
/// ```
/// use sales_analytics::types::normalize_dimension_name;
/// assert_eq!(normalize_dimension_name(" Payment Method "), "payment_method");
/// assert_eq!(normalize_dimension_name("sold-by"), "sold_by");
/// ```
pub fn normalize_dimension_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}
