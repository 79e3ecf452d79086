//! Reading dashboard export files from disk

use std::path::{Path, PathBuf};

use anyhow::Result;
use encoding_rs::WINDOWS_1252;
use sha2::{Digest, Sha256};

use super::Document;
use crate::error::ColumnLensError;

/// A parsed document together with provenance of the bytes it came from
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    pub document: Document,
    /// SHA-256 of the raw file bytes, uppercase hex
    pub source_checksum: String,
}

/// Load and parse a dashboard export JSON file.
pub fn load_document(path: &Path) -> Result<LoadedDocument> {
    if !path.exists() {
        return Err(ColumnLensError::InputNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }

    let bytes = std::fs::read(path).map_err(|e| ColumnLensError::DocumentReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut hasher = Sha256::new();
    hasher.update(&bytes);
    let source_checksum = format!("{:X}", hasher.finalize());

    let text = decode_with_fallback(&bytes).map_err(|e| ColumnLensError::DocumentReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let document: Document =
        serde_json::from_str(&text).map_err(|e| ColumnLensError::DocumentParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

    tracing::debug!(
        path = %path.display(),
        datasets = document.datasets.len(),
        pages = document.pages.len(),
        "loaded dashboard document"
    );

    Ok(LoadedDocument {
        path: path.to_path_buf(),
        document,
        source_checksum,
    })
}

/// Parse a dashboard export from an in-memory JSON string.
pub fn parse_document(text: &str) -> Result<Document> {
    let document = serde_json::from_str(strip_bom(text))?;
    Ok(document)
}

/// Decode file bytes, trying UTF-8 first, then Windows-1252 as fallback
fn decode_with_fallback(bytes: &[u8]) -> std::io::Result<String> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(strip_bom(s).to_string()),
        Err(_) => {
            // Exports hand-edited on Windows sometimes end up in a legacy code page
            let (decoded, _, had_errors) = WINDOWS_1252.decode(bytes);
            if had_errors {
                Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "File contains invalid characters",
                ))
            } else {
                Ok(decoded.into_owned())
            }
        }
    }
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}
