//! Sales and Trainer Analytics Pivot Engine
//!

pub mod analysis;
pub mod cli;
pub mod config;
pub mod errors;
pub mod processor;
pub mod summary;
pub mod types;
pub mod utils;
