//! Aggregated views over harvested usage records
//!
//! Records are stored once in traversal order; the per-table grouping holds
//! positions into that sequence so each group keeps emission order.

use std::collections::{BTreeMap, BTreeSet};

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};

use crate::dataset::DatasetMap;
use crate::harvest::{UsageKind, UsageRecord};

/// Read-only index of which columns a dashboard references
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageIndex {
    records: Vec<UsageRecord>,
    by_table: BTreeMap<String, Vec<usize>>,
    all_columns: Vec<String>,
    all_expressions: Vec<String>,
    all_filters: Vec<String>,
    dataset_map: DatasetMap,
}

/// Aggregate records without dataset provenance.
pub fn build_index(records: Vec<UsageRecord>) -> UsageIndex {
    UsageIndex::build(records, DatasetMap::default())
}

impl UsageIndex {
    pub fn build(records: Vec<UsageRecord>, dataset_map: DatasetMap) -> Self {
        let mut by_table: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        let mut columns = BTreeSet::new();
        let mut all_expressions = Vec::new();
        let mut all_filters = Vec::new();

        for (pos, record) in records.iter().enumerate() {
            by_table
                .entry(record.table_name.clone())
                .or_default()
                .push(pos);
            columns.extend(record.columns_used.iter().cloned());
            match record.kind {
                UsageKind::Field => all_expressions.push(record.expression_text.clone()),
                UsageKind::Filter => all_filters.push(record.expression_text.clone()),
            }
        }

        Self {
            records,
            by_table,
            all_columns: columns.into_iter().collect(),
            all_expressions,
            all_filters,
            dataset_map,
        }
    }

    /// All records in document traversal order
    pub fn by_widget(&self) -> &[UsageRecord] {
        &self.records
    }

    /// Table names referenced by at least one record, sorted
    pub fn tables(&self) -> impl Iterator<Item = &str> {
        self.by_table.keys().map(String::as_str)
    }

    /// Records for one table, in traversal order
    pub fn table_records<'a>(&'a self, table_name: &str) -> impl Iterator<Item = &'a UsageRecord> {
        self.by_table
            .get(table_name)
            .into_iter()
            .flatten()
            .map(|&pos| &self.records[pos])
    }

    /// Every table with its records
    pub fn by_table(&self) -> impl Iterator<Item = (&str, Vec<&UsageRecord>)> {
        self.by_table.iter().map(|(table, positions)| {
            let group = positions.iter().map(|&pos| &self.records[pos]).collect();
            (table.as_str(), group)
        })
    }

    pub fn table_count(&self) -> usize {
        self.by_table.len()
    }

    /// Union of the columns used by a table's records, sorted.
    ///
    /// Unknown tables yield an empty list.
    pub fn used_columns(&self, table_name: &str) -> Vec<String> {
        let columns: BTreeSet<&String> = self
            .table_records(table_name)
            .flat_map(|record| record.columns_used.iter())
            .collect();
        columns.into_iter().cloned().collect()
    }

    pub fn all_columns(&self) -> &[String] {
        &self.all_columns
    }

    pub fn all_expressions(&self) -> &[String] {
        &self.all_expressions
    }

    pub fn all_filters(&self) -> &[String] {
        &self.all_filters
    }

    pub fn dataset_map(&self) -> &DatasetMap {
        &self.dataset_map
    }

    pub fn field_count(&self) -> usize {
        self.all_expressions.len()
    }

    pub fn filter_count(&self) -> usize {
        self.all_filters.len()
    }
}

/// Serializes `by_table` as an object of table name to record list
struct ByTable<'a>(&'a UsageIndex);

impl Serialize for ByTable<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.by_table.len()))?;
        for (table, group) in self.0.by_table() {
            map.serialize_entry(table, &group)?;
        }
        map.end()
    }
}

impl Serialize for UsageIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("UsageIndex", 6)?;
        state.serialize_field("by_widget", &self.records)?;
        state.serialize_field("by_table", &ByTable(self))?;
        state.serialize_field("all_columns", &self.all_columns)?;
        state.serialize_field("all_expressions", &self.all_expressions)?;
        state.serialize_field("all_filters", &self.all_filters)?;
        state.serialize_field("dataset_mapping", &self.dataset_map)?;
        state.end()
    }
}
