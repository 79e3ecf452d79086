//! column-lens: find the source columns a dashboard actually uses
//!
//! This library reads an exported dashboard definition, resolves each dataset
//! to the table it queries, collects the backtick-quoted columns referenced by
//! widget field and filter expressions, and generates catalog queries that
//! compare that usage against the live schema and lineage tables.

pub mod columns;
pub mod dataset;
pub mod document;
pub mod error;
pub mod generate;
pub mod harvest;
pub mod index;
pub mod output;
pub mod report;

use std::path::PathBuf;

use anyhow::Result;

pub use columns::extract_columns;
pub use dataset::{resolve, DatasetMap};
pub use document::{load_document, parse_document, Document, LoadedDocument};
pub use error::ColumnLensError;
pub use generate::{generate_queries, CatalogDefaults, QueryLanguage, QuerySet};
pub use harvest::{harvest, UsageKind, UsageRecord};
pub use index::{build_index, UsageIndex};
pub use output::OutputFormat;

/// Options for analyzing a dashboard export
#[derive(Debug, Clone)]
pub struct AnalyzeOptions {
    /// Path to the dashboard export JSON file
    pub dashboard_path: PathBuf,
    /// Directory generated files are written to
    pub output_dir: PathBuf,
    /// Query languages to generate
    pub format: OutputFormat,
    /// Write files; when false queries are only returned
    pub save: bool,
    /// Catalog and schema for table names that omit them
    pub defaults: CatalogDefaults,
}

/// Result of a full analyze run
#[derive(Debug)]
pub struct Analysis {
    pub source: LoadedDocument,
    pub index: UsageIndex,
    pub query_sets: Vec<QuerySet>,
    pub written_files: Vec<PathBuf>,
}

/// Run resolver, harvester and index over one document.
pub fn extract_usage(document: &Document) -> UsageIndex {
    let dataset_map = dataset::resolve(document);
    let records = harvest::harvest(document, &dataset_map);
    UsageIndex::build(records, dataset_map)
}

/// Load a dashboard, extract column usage and generate comparison queries
pub fn analyze_dashboard(options: &AnalyzeOptions) -> Result<Analysis> {
    tracing::info!(path = %options.dashboard_path.display(), "loading dashboard");

    // Step 1: Load and parse the export
    let source = document::load_document(&options.dashboard_path)?;

    // Step 2: Extract column usage
    let index = extract_usage(&source.document);
    tracing::info!(
        tables = index.table_count(),
        columns = index.all_columns().len(),
        records = index.by_widget().len(),
        "extracted column usage"
    );

    // Step 3: Generate queries for each requested language
    let usage = generate::table_usage(&index, &options.defaults);
    let column_lists = generate::column_lists::render(&usage);
    let stamp = output::SourceStamp {
        path: source.path.clone(),
        checksum: source.source_checksum.clone(),
    };

    let mut query_sets = Vec::new();
    let mut written_files = Vec::new();
    for &language in options.format.languages() {
        let queries = generate::generate_queries(&index, language, &options.defaults);

        // Step 4: Write files
        if options.save {
            let dir = options.format.language_dir(&options.output_dir, language);
            let files = output::write_query_set(&queries, &column_lists, &dir, Some(&stamp))?;
            tracing::info!(dir = %dir.display(), files = files.len(), %language, "saved queries");
            written_files.extend(files);
        }
        query_sets.push(queries);
    }

    Ok(Analysis {
        source,
        index,
        query_sets,
        written_files,
    })
}
