//! Grouping engine
//!
//! Partitions records by one or two dimension levels. Groups keep first-seen
//! order so that later stable sorts break ties by input order.

use crate::types::{Dimension, Record};
use std::collections::HashMap;

/// Fallback label for records with no value for the grouping dimension
pub const DEFAULT_FALLBACK_LABEL: &str = "Unknown";

/// Records sharing one dimension value
#[derive(Debug, Clone)]
pub struct Group<'a> {
    pub label: String,
    pub records: Vec<&'a Record>,
    /// Second-level groups; empty for single-level partitions
    pub children: Vec<Group<'a>>,
}

impl<'a> Group<'a> {
    fn new(label: String) -> Self {
        Self {
            label,
            records: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Records in the leaf groups under this one
    pub fn record_count(&self) -> usize {
        if self.children.is_empty() {
            self.records.len()
        } else {
            self.children.iter().map(Group::record_count).sum()
        }
    }
}

/// Partition `records` with an arbitrary key extractor
///
/// Every record lands in exactly one group. `None`, empty and whitespace-only
/// keys are coalesced into the `fallback` group.
pub fn partition_by<'a, I, F>(records: I, extractor: F, fallback: &str) -> Vec<Group<'a>>
where
    I: IntoIterator<Item = &'a Record>,
    F: Fn(&Record) -> Option<String>,
{
    let mut groups: Vec<Group<'a>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let label = extractor(record)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| fallback.to_string());

        let slot = match index.get(&label) {
            Some(&slot) => slot,
            None => {
                index.insert(label.clone(), groups.len());
                groups.push(Group::new(label));
                groups.len() - 1
            }
        };
        groups[slot].records.push(record);
    }

    groups
}

/// Partition by a dimension's value
pub fn partition<'a, I>(records: I, dimension: &Dimension, fallback: &str) -> Vec<Group<'a>>
where
    I: IntoIterator<Item = &'a Record>,
{
    partition_by(
        records,
        |r| r.group_value(dimension.key()).map(str::to_string),
        fallback,
    )
}

/// Two-level partition: `outer` groups each holding `inner` children
///
/// The outer group's `records` still lists all of its records so row totals
/// can be computed without walking the children.
pub fn partition_nested<'a, I>(
    records: I,
    outer: &Dimension,
    inner: &Dimension,
    fallback: &str,
) -> Vec<Group<'a>>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut groups = partition(records, outer, fallback);
    for group in &mut groups {
        group.children = partition(group.records.iter().copied(), inner, fallback);
    }
    groups
}
