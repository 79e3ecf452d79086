//! Dataset id to table name resolution
//!
//! Each dataset's query text is scanned for the first `FROM <identifier>`
//! clause. The identifier is kept verbatim (1, 2 or 3 dotted parts); splitting
//! into catalog/schema/table is left to the query generators.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::document::Document;

/// FROM clause target: `table`, `schema.table` or `catalog.schema.table`
static FROM_TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)FROM\s+([A-Za-z0-9_]+(?:\.[A-Za-z0-9_]+){0,2})").unwrap()
});

/// Mapping from dataset id to its resolved table identifier.
///
/// Every keyed dataset in the document has exactly one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DatasetMap {
    entries: BTreeMap<String, String>,
}

impl DatasetMap {
    pub fn get(&self, dataset_id: &str) -> Option<&str> {
        self.entries.get(dataset_id).map(String::as_str)
    }

    /// Resolve a dataset id, falling back to the id itself when unmapped.
    pub fn table_for<'a>(&'a self, dataset_id: &'a str) -> &'a str {
        self.get(dataset_id).unwrap_or(dataset_id)
    }

    /// Entries sorted by dataset id
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, String)> for DatasetMap {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Build the dataset map for a document.
///
/// Fallback chain per dataset: first FROM target, then `display_name`, then
/// the dataset id. Datasets without an id cannot be referenced and are skipped.
pub fn resolve(document: &Document) -> DatasetMap {
    let mut entries = BTreeMap::new();

    for dataset in &document.datasets {
        let Some(id) = dataset.id.as_deref() else {
            tracing::debug!("skipping dataset without a name");
            continue;
        };

        let from_query = if dataset.query_lines.is_empty() {
            None
        } else {
            extract_table_name(&dataset.query_lines.join(" ")).map(str::to_string)
        };

        let table_name = match from_query {
            Some(table) => table,
            None => {
                let fallback = dataset
                    .display_name
                    .as_deref()
                    .filter(|name| !name.is_empty())
                    .unwrap_or(id);
                tracing::debug!(dataset = id, fallback, "no FROM clause found");
                fallback.to_string()
            }
        };

        entries.insert(id.to_string(), table_name);
    }

    DatasetMap { entries }
}

/// Extract the first FROM target from a query string.
///
/// Only the first match counts, so a leading CTE or subquery resolves to the
/// table it reads from rather than the outer query's source.
pub fn extract_table_name(query: &str) -> Option<&str> {
    FROM_TABLE_RE
        .captures(query)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
