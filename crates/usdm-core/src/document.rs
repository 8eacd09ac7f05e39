//! # Document Loading
//!
//! Reads a file from disk and parses it into a [`Value`] tree. The decoder
//! is chosen from the file extension alone: `.yaml` and `.yml` are YAML,
//! everything else is JSON.
//!
//! YAML is read with the YAML 1.1 scalar rules by [`crate::yaml`] and lands
//! in the same JSON tree, so downstream code never sees YAML-only constructs
//! such as tags, anchors or merge keys.

use std::path::Path;

use serde_json::Value;

use crate::error::{DocumentError, YamlError};
use crate::yaml::load_yaml;

/// On-disk serialization of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// YAML 1.1.
    Yaml,
    /// Plain JSON.
    Json,
}

impl DocumentFormat {
    /// Pick the decoder for a path from its extension.
    ///
    /// `.yaml` and `.yml` select YAML; anything else, including a missing
    /// extension or an upper-case `.YAML`, selects JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Read and parse the document at `path`.
///
/// # Errors
///
/// Returns [`DocumentError::Read`] if the file cannot be read, and a parse
/// or conversion error if its contents are malformed.
pub fn load_document(path: &Path) -> Result<Value, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let format = DocumentFormat::from_path(path);
    tracing::debug!(path = %path.display(), ?format, bytes = content.len(), "loaded document");
    parse_document(&content, format, path)
}

/// Parse document text in the given format.
///
/// `path` is only used to label errors.
pub fn parse_document(
    text: &str,
    format: DocumentFormat,
    path: &Path,
) -> Result<Value, DocumentError> {
    match format {
        DocumentFormat::Json => serde_json::from_str(text).map_err(|source| DocumentError::Json {
            path: path.to_path_buf(),
            source,
        }),
        DocumentFormat::Yaml => load_yaml(text).map_err(|err| match err {
            YamlError::Syntax(source) => DocumentError::Yaml {
                path: path.to_path_buf(),
                source,
            },
            YamlError::Unrepresentable(reason) => DocumentError::Conversion {
                path: path.to_path_buf(),
                reason,
            },
        }),
    }
}
