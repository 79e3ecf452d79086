//! Error types for column-lens

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading a dashboard or writing generated output
#[derive(Error, Debug)]
pub enum ColumnLensError {
    #[error("File not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Failed to read dashboard file: {path}")]
    DocumentReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid JSON in dashboard file {path}: {source}")]
    DocumentParseError {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to create output directory: {path}")]
    OutputDirError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output file: {path}")]
    OutputWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize extraction results: {message}")]
    SerializeError { message: String },
}

impl From<serde_json::Error> for ColumnLensError {
    fn from(err: serde_json::Error) -> Self {
        ColumnLensError::SerializeError {
            message: err.to_string(),
        }
    }
}
