//! Catalog comparison query generation
//!
//! Turns a [`UsageIndex`] into text a user runs against the workspace catalog:
//! SQL queries, equivalent PySpark scripts, and ready-to-copy column lists.
//! Nothing here executes a query.

pub mod column_lists;
pub mod python;
pub mod sql;

use std::collections::BTreeMap;
use std::fmt;

use crate::index::UsageIndex;

/// Catalog and schema applied to table names that omit them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogDefaults {
    pub catalog: String,
    pub schema: String,
}

impl Default for CatalogDefaults {
    fn default() -> Self {
        Self {
            catalog: "hive_metastore".to_string(),
            schema: "default".to_string(),
        }
    }
}

/// A table identifier split into its three catalog parts
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TableRef {
    pub catalog: String,
    pub schema: String,
    pub table: String,
}

impl TableRef {
    /// Split a dotted table name, filling missing parts from `defaults`.
    ///
    /// Names with one part or more than three parts are treated as a bare
    /// table name in the default schema.
    pub fn parse(name: &str, defaults: &CatalogDefaults) -> Self {
        let parts: Vec<&str> = name.split('.').collect();
        match parts.as_slice() {
            [catalog, schema, table] => Self {
                catalog: catalog.to_string(),
                schema: schema.to_string(),
                table: table.to_string(),
            },
            [schema, table] => Self {
                catalog: defaults.catalog.clone(),
                schema: schema.to_string(),
                table: table.to_string(),
            },
            _ => Self {
                catalog: defaults.catalog.clone(),
                schema: defaults.schema.clone(),
                table: name.to_string(),
            },
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.catalog, self.schema, self.table)
    }
}

/// A dashboard table with its normalized reference and used columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableUsage {
    /// Name as recorded in the index
    pub name: String,
    pub table_ref: TableRef,
    pub used_columns: Vec<String>,
}

/// Collect per-table usage from the index, sorted by table name.
pub fn table_usage(index: &UsageIndex, defaults: &CatalogDefaults) -> Vec<TableUsage> {
    index
        .tables()
        .map(|name| TableUsage {
            name: name.to_string(),
            table_ref: TableRef::parse(name, defaults),
            used_columns: index.used_columns(name),
        })
        .collect()
}

/// Group table names by catalog, then schema
pub(crate) fn group_by_schema(
    usage: &[TableUsage],
) -> BTreeMap<(&str, &str), Vec<&str>> {
    let mut groups: BTreeMap<(&str, &str), Vec<&str>> = BTreeMap::new();
    for table in usage {
        groups
            .entry((table.table_ref.catalog.as_str(), table.table_ref.schema.as_str()))
            .or_default()
            .push(table.table_ref.table.as_str());
    }
    groups
}

/// Output language for generated queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryLanguage {
    Sql,
    Python,
}

impl QueryLanguage {
    pub fn extension(&self) -> &'static str {
        match self {
            QueryLanguage::Sql => "sql",
            QueryLanguage::Python => "py",
        }
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            QueryLanguage::Sql => "sql",
            QueryLanguage::Python => "python",
        }
    }
}

impl fmt::Display for QueryLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryLanguage::Sql => write!(f, "SQL"),
            QueryLanguage::Python => write!(f, "PYTHON"),
        }
    }
}

/// The generated queries for one language
#[derive(Debug, Clone)]
pub struct QuerySet {
    pub language: QueryLanguage,
    pub table_columns: String,
    pub lineage: String,
    pub unused_columns: String,
    /// Full used/unused comparison; only produced for SQL
    pub comparison: Option<String>,
}

/// Generate every query for the given language.
pub fn generate_queries(
    index: &UsageIndex,
    language: QueryLanguage,
    defaults: &CatalogDefaults,
) -> QuerySet {
    let usage = table_usage(index, defaults);
    tracing::debug!(tables = usage.len(), %language, "generating queries");

    match language {
        QueryLanguage::Sql => QuerySet {
            language,
            table_columns: sql::table_columns(&usage),
            lineage: sql::lineage(&usage),
            unused_columns: sql::unused_columns(&usage),
            comparison: Some(sql::comparison(&usage)),
        },
        QueryLanguage::Python => QuerySet {
            language,
            table_columns: python::table_columns(&usage),
            lineage: python::lineage(&usage),
            unused_columns: python::unused_columns(&usage),
            comparison: None,
        },
    }
}

/// Quote a value as a SQL string literal
pub(crate) fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Quote a value as a Python string literal
pub(crate) fn py_literal(value: &str) -> String {
    format!(
        "'{}'",
        value
            .replace('\\', "\\\\")
            .replace('\'', "\\'")
            .replace('\n', "\\n")
            .replace('\r', "\\r")
    )
}

/// Flatten a value onto one line so it cannot end a `--` comment
pub(crate) fn comment_text(value: &str) -> String {
    value.replace("\r\n", " ").replace(|c: char| c == '\r' || c == '\n', " ")
}
