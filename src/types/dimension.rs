//! Grouping dimensions

use super::record::normalize_dimension_name;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A record attribute rows can be grouped by
///
/// The named variants cover the columns the sales exports always carry; any
/// other column is reachable through [`Dimension::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum Dimension {
    Category,
    Product,
    Trainer,
    Location,
    PaymentMethod,
    SoldBy,
    Custom(String),
}

impl Dimension {
    /// Key into [`Record::group_keys`](super::Record::group_keys)
    pub fn key(&self) -> &str {
        match self {
            Dimension::Category => "category",
            Dimension::Product => "product",
            Dimension::Trainer => "trainer",
            Dimension::Location => "location",
            Dimension::PaymentMethod => "payment_method",
            Dimension::SoldBy => "sold_by",
            Dimension::Custom(key) => key,
        }
    }

    pub fn label(&self) -> String {
        match self {
            Dimension::Category => "Category".to_string(),
            Dimension::Product => "Product".to_string(),
            Dimension::Trainer => "Trainer".to_string(),
            Dimension::Location => "Location".to_string(),
            Dimension::PaymentMethod => "Payment Method".to_string(),
            Dimension::SoldBy => "Sold By".to_string(),
            Dimension::Custom(key) => key
                .split('_')
                .filter(|part| !part.is_empty())
                .map(|part| {
                    let mut chars = part.chars();
                    match chars.next() {
                        Some(first) => first.to_uppercase().chain(chars).collect(),
                        None => String::new(),
                    }
                })
                .collect::<Vec<String>>()
                .join(" "),
        }
    }
}

impl From<String> for Dimension {
    fn from(value: String) -> Self {
        match normalize_dimension_name(&value).as_str() {
            "category" => Dimension::Category,
            "product" => Dimension::Product,
            "trainer" => Dimension::Trainer,
            "location" => Dimension::Location,
            "payment_method" | "paymentmethod" => Dimension::PaymentMethod,
            "sold_by" | "soldby" => Dimension::SoldBy,
            other => Dimension::Custom(other.to_string()),
        }
    }
}

impl From<Dimension> for String {
    fn from(value: Dimension) -> Self {
        value.key().to_string()
    }
}

impl FromStr for Dimension {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err("Dimension name cannot be empty".to_string());
        }
        Ok(Dimension::from(s.to_string()))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
