//! Writing generated queries and extraction results to disk

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::error::ColumnLensError;
use crate::generate::{QueryLanguage, QuerySet};
use crate::index::UsageIndex;

pub const COLUMN_LIST_FILE: &str = "00_COLUMNS_TO_COPY.txt";

/// Which query languages to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Sql,
    Python,
    Both,
}

impl OutputFormat {
    pub fn languages(&self) -> &'static [QueryLanguage] {
        match self {
            OutputFormat::Sql => &[QueryLanguage::Sql],
            OutputFormat::Python => &[QueryLanguage::Python],
            OutputFormat::Both => &[QueryLanguage::Sql, QueryLanguage::Python],
        }
    }

    /// Directory for one language's files; `Both` splits into subdirectories
    pub fn language_dir(&self, root: &Path, language: QueryLanguage) -> PathBuf {
        match self {
            OutputFormat::Both => root.join(language.dir_name()),
            _ => root.to_path_buf(),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sql" => Ok(OutputFormat::Sql),
            "python" | "py" => Ok(OutputFormat::Python),
            "both" => Ok(OutputFormat::Both),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Provenance line stamped at the top of generated files
#[derive(Debug, Clone)]
pub struct SourceStamp {
    pub path: PathBuf,
    pub checksum: String,
}

impl SourceStamp {
    fn comment(&self, prefix: &str) -> String {
        format!(
            "{} Source: {} (sha256 {})\n",
            prefix,
            self.path.display(),
            self.checksum
        )
    }
}

/// Write a query set plus the column list file into `dir`.
///
/// Returns the paths written, in file-number order.
pub fn write_query_set(
    queries: &QuerySet,
    column_lists: &str,
    dir: &Path,
    stamp: Option<&SourceStamp>,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|e| ColumnLensError::OutputDirError {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let ext = queries.language.extension();
    let prefix = match queries.language {
        QueryLanguage::Sql => "--",
        QueryLanguage::Python => "#",
    };
    let header = stamp.map(|s| s.comment(prefix)).unwrap_or_default();

    let mut files: Vec<(String, String)> = vec![
        (COLUMN_LIST_FILE.to_string(), column_lists.to_string()),
        (
            format!("01_table_columns.{}", ext),
            format!("{}{}", header, queries.table_columns),
        ),
        (
            format!("02_lineage.{}", ext),
            format!("{}{}", header, queries.lineage),
        ),
        (
            format!("03_unused_columns.{}", ext),
            format!("{}{}", header, queries.unused_columns),
        ),
    ];
    if let Some(comparison) = &queries.comparison {
        files.push((
            format!("04_comparison_analysis.{}", ext),
            format!("{}{}", header, comparison),
        ));
    }

    let mut written = Vec::with_capacity(files.len());
    for (name, content) in files {
        let path = dir.join(name);
        write_file(&path, &content)?;
        tracing::debug!(path = %path.display(), bytes = content.len(), "wrote output file");
        written.push(path);
    }

    Ok(written)
}

/// Write the full extraction index as pretty-printed JSON.
pub fn write_index_json(index: &UsageIndex, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(index).map_err(ColumnLensError::from)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ColumnLensError::OutputDirError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    write_file(path, &json)
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| ColumnLensError::OutputWriteError {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
