//! Shared helpers: date normalisation, safe arithmetic, number formatting

pub mod currency;
pub mod math;
pub mod time;
