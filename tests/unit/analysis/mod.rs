//! Analysis module unit tests

pub mod date_and_growth;
pub mod metric_properties;
pub mod pivot_properties;
