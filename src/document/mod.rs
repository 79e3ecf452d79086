//! Dashboard export document model and loader
//!
//! Mirrors the subset of the exported dashboard JSON that column extraction
//! reads. Every container defaults to empty and every scalar to absent, so a
//! sparse export deserializes cleanly; a value of the wrong JSON type is
//! rejected by serde.

mod loader;

pub use loader::{load_document, parse_document, LoadedDocument};

use serde::Deserialize;

/// A complete dashboard export
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub datasets: Vec<Dataset>,
    #[serde(default)]
    pub pages: Vec<Page>,
}

/// A reusable query definition that widgets reference by id
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    /// Dataset identifier (`name` in the export)
    #[serde(rename = "name")]
    pub id: Option<String>,
    pub display_name: Option<String>,
    #[serde(default)]
    pub query_lines: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub display_name: Option<String>,
    #[serde(default)]
    pub layout: Vec<LayoutItem>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LayoutItem {
    #[serde(default)]
    pub widget: Widget,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Widget {
    pub name: Option<String>,
    pub spec: Option<WidgetSpec>,
    #[serde(default)]
    pub queries: Vec<QueryItem>,
}

impl Widget {
    /// The frame title, if the widget carries a non-empty one
    pub fn title(&self) -> Option<&str> {
        self.spec
            .as_ref()
            .and_then(|spec| spec.frame.as_ref())
            .and_then(|frame| frame.title.as_deref())
            .filter(|title| !title.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct WidgetSpec {
    pub frame: Option<Frame>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Frame {
    pub title: Option<String>,
}

/// Wrapper around a query, as nested in `widget.queries[]`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QueryItem {
    #[serde(default)]
    pub query: Query,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// Dataset id this query runs against (`datasetName` in the export)
    #[serde(rename = "datasetName")]
    pub dataset_id: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
    #[serde(default)]
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Field {
    pub name: Option<String>,
    pub expression: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Filter {
    pub expression: Option<String>,
}
