//! Metric identifiers and their computation classes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a metric combines records
///
/// Only [`MetricClass::Additive`] values could in principle be summed across
/// buckets. The engine recomputes every class from raw records at each level
/// anyway; the class documents why that is required for the other three.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricClass {
    Additive,
    /// Distinct count; never summed across buckets
    Distinct,
    /// Σ numerator / Σ denominator
    RatioOfSums,
    /// Needs each identity's purchases sorted by date
    SequenceDerived,
}

/// Display unit of a metric value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricUnit {
    Currency,
    Count,
    Ratio,
    Percentage,
    Days,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    Revenue,
    Transactions,
    Units,
    Vat,
    DiscountValue,
    Members,
    Atv,
    Auv,
    Upt,
    DiscountPercentage,
    DiscountRate,
    RevenuePerMember,
    SessionsPerMember,
    RepeatRate,
    PurchaseFrequency,
    CustomerLifespan,
    DaysToSecondPurchase,
}

impl Metric {
    pub const ALL: [Metric; 17] = [
        Metric::Revenue,
        Metric::Transactions,
        Metric::Units,
        Metric::Vat,
        Metric::DiscountValue,
        Metric::Members,
        Metric::Atv,
        Metric::Auv,
        Metric::Upt,
        Metric::DiscountPercentage,
        Metric::DiscountRate,
        Metric::RevenuePerMember,
        Metric::SessionsPerMember,
        Metric::RepeatRate,
        Metric::PurchaseFrequency,
        Metric::CustomerLifespan,
        Metric::DaysToSecondPurchase,
    ];

    /// Stable identifier used in CLI arguments, JSON and file names
    pub fn id(&self) -> &'static str {
        match self {
            Metric::Revenue => "revenue",
            Metric::Transactions => "transactions",
            Metric::Units => "units",
            Metric::Vat => "vat",
            Metric::DiscountValue => "discountValue",
            Metric::Members => "members",
            Metric::Atv => "atv",
            Metric::Auv => "auv",
            Metric::Upt => "upt",
            Metric::DiscountPercentage => "discountPercentage",
            Metric::DiscountRate => "discountRate",
            Metric::RevenuePerMember => "revenuePerMember",
            Metric::SessionsPerMember => "sessionsPerMember",
            Metric::RepeatRate => "repeatRate",
            Metric::PurchaseFrequency => "purchaseFrequency",
            Metric::CustomerLifespan => "customerLifespan",
            Metric::DaysToSecondPurchase => "daysToSecondPurchase",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Revenue => "Revenue",
            Metric::Transactions => "Transactions",
            Metric::Units => "Units Sold",
            Metric::Vat => "VAT",
            Metric::DiscountValue => "Discount Value",
            Metric::Members => "Unique Members",
            Metric::Atv => "Average Transaction Value",
            Metric::Auv => "Average Unit Value",
            Metric::Upt => "Units per Transaction",
            Metric::DiscountPercentage => "Average Discount %",
            Metric::DiscountRate => "Discount Rate",
            Metric::RevenuePerMember => "Revenue per Member",
            Metric::SessionsPerMember => "Sessions per Member",
            Metric::RepeatRate => "Repeat Purchase Rate",
            Metric::PurchaseFrequency => "Purchase Frequency (days)",
            Metric::CustomerLifespan => "Customer Lifespan (days)",
            Metric::DaysToSecondPurchase => "Days to Second Purchase",
        }
    }

    pub fn class(&self) -> MetricClass {
        match self {
            Metric::Revenue
            | Metric::Transactions
            | Metric::Units
            | Metric::Vat
            | Metric::DiscountValue => MetricClass::Additive,
            Metric::Members => MetricClass::Distinct,
            Metric::Atv
            | Metric::Auv
            | Metric::Upt
            | Metric::DiscountPercentage
            | Metric::DiscountRate
            | Metric::RevenuePerMember
            | Metric::SessionsPerMember
            | Metric::RepeatRate => MetricClass::RatioOfSums,
            Metric::PurchaseFrequency
            | Metric::CustomerLifespan
            | Metric::DaysToSecondPurchase => MetricClass::SequenceDerived,
        }
    }

    pub fn unit(&self) -> MetricUnit {
        match self {
            Metric::Revenue
            | Metric::Vat
            | Metric::DiscountValue
            | Metric::Atv
            | Metric::Auv
            | Metric::RevenuePerMember => MetricUnit::Currency,
            Metric::Transactions | Metric::Units | Metric::Members => MetricUnit::Count,
            Metric::Upt | Metric::SessionsPerMember => MetricUnit::Ratio,
            Metric::DiscountPercentage | Metric::DiscountRate | Metric::RepeatRate => {
                MetricUnit::Percentage
            }
            Metric::PurchaseFrequency
            | Metric::CustomerLifespan
            | Metric::DaysToSecondPurchase => MetricUnit::Days,
        }
    }

    pub fn is_additive(&self) -> bool {
        self.class() == MetricClass::Additive
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Metric {
    type Err = String;

    /// Accepts `discountValue`, `discount_value`, `discount-value`, any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-' && *c != ' ')
            .collect::<String>()
            .to_lowercase();
        Metric::ALL
            .iter()
            .find(|m| m.id().to_lowercase() == wanted)
            .copied()
            .ok_or_else(|| {
                let known: Vec<&str> = Metric::ALL.iter().map(|m| m.id()).collect();
                format!("Unknown metric '{}'. Expected one of: {}", s, known.join(", "))
            })
    }
}
