//! Sales Analytics - Type System
//!
//! - `record`: Input transaction record and identity/dimension normalisation
//! - `bucket`: Calendar-month buckets and ordered bucket sequences
//! - `dimension`: Grouping dimensions
//! - `metric`: Metric identifiers, computation classes and display units
//! - `pivot`: Pivot table output (rows, totals, growth)

mod bucket;
mod dimension;
mod metric;
mod pivot;
mod record;

pub use bucket::{BucketOrder, BucketSequence, TimeBucket};
pub use dimension::Dimension;
pub use metric::{Metric, MetricClass, MetricUnit};
pub use pivot::{Growth, PivotRow, PivotTable, TotalScope};
pub use record::{normalize_dimension_name, resolve_identity, Record, UNKNOWN_IDENTITY};
