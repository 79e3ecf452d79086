//! Walk a dashboard document and record every expression it evaluates
//!
//! Traversal order is fixed: pages, layout items, widget queries, then each
//! query's fields followed by its filters. One [`UsageRecord`] is emitted per
//! non-empty expression.

use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::columns::extract_columns;
use crate::dataset::DatasetMap;
use crate::document::{Document, Query};

pub const UNKNOWN_PAGE: &str = "Unknown Page";
pub const UNKNOWN_WIDGET: &str = "Unknown Widget";
pub const UNKNOWN_DATASET: &str = "Unknown Dataset";
pub const UNKNOWN_FIELD: &str = "Unknown Field";

/// Where an expression came from within a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UsageKind {
    Field,
    Filter,
}

impl fmt::Display for UsageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsageKind::Field => write!(f, "field"),
            UsageKind::Filter => write!(f, "filter"),
        }
    }
}

/// One observed expression and the table it reads from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsageRecord {
    pub page: String,
    /// Widget frame title, or the widget name when untitled
    pub widget: String,
    pub dataset_id: String,
    pub table_name: String,
    #[serde(rename = "type")]
    pub kind: UsageKind,
    /// Present only for field records
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    #[serde(rename = "expression")]
    pub expression_text: String,
    pub columns_used: BTreeSet<String>,
}

/// Location of a query inside the document, shared by all its records
struct QueryContext<'a> {
    page: &'a str,
    widget: &'a str,
    dataset_id: &'a str,
    table_name: &'a str,
}

impl QueryContext<'_> {
    fn record(
        &self,
        kind: UsageKind,
        field_name: Option<String>,
        expression: &str,
    ) -> UsageRecord {
        UsageRecord {
            page: self.page.to_string(),
            widget: self.widget.to_string(),
            dataset_id: self.dataset_id.to_string(),
            table_name: self.table_name.to_string(),
            kind,
            field_name,
            expression_text: expression.to_string(),
            columns_used: extract_columns(expression),
        }
    }
}

/// Collect usage records for every non-empty field and filter expression.
pub fn harvest(document: &Document, dataset_map: &DatasetMap) -> Vec<UsageRecord> {
    let mut records = Vec::new();

    for page in &document.pages {
        let page_name = page.display_name.as_deref().unwrap_or(UNKNOWN_PAGE);

        for item in &page.layout {
            let widget = &item.widget;
            let widget_label = widget
                .title()
                .or(widget.name.as_deref())
                .unwrap_or(UNKNOWN_WIDGET);

            for query_item in &widget.queries {
                let query = &query_item.query;
                let dataset_id = query.dataset_id.as_deref().unwrap_or(UNKNOWN_DATASET);
                let ctx = QueryContext {
                    page: page_name,
                    widget: widget_label,
                    dataset_id,
                    table_name: dataset_map.table_for(dataset_id),
                };
                harvest_query(&ctx, query, &mut records);
            }
        }
    }

    tracing::debug!(records = records.len(), "harvested expressions");
    records
}

fn harvest_query(ctx: &QueryContext<'_>, query: &Query, records: &mut Vec<UsageRecord>) {
    for field in &query.fields {
        // Plain column selections carry no expression and are skipped
        let Some(expression) = non_empty(field.expression.as_deref()) else {
            continue;
        };
        let field_name = field.name.as_deref().unwrap_or(UNKNOWN_FIELD).to_string();
        records.push(ctx.record(UsageKind::Field, Some(field_name), expression));
    }

    for filter in &query.filters {
        let Some(expression) = non_empty(filter.expression.as_deref()) else {
            continue;
        };
        records.push(ctx.record(UsageKind::Filter, None, expression));
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.is_empty())
}
