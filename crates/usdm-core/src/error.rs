//! # Error Types
//!
//! Errors raised while reading, parsing, converting or writing documents.
//! Every variant names the file it concerns so that the CLI can print a
//! useful message without extra context.

use std::path::PathBuf;

use thiserror::Error;
use yaml_rust::ScanError;

/// Error while loading, converting or writing a document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read '{}': {source}", .path.display())]
    Read {
        /// Path that was being read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The file could not be written.
    #[error("cannot write '{}': {source}", .path.display())]
    Write {
        /// Path that was being written.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The text is not well-formed YAML.
    #[error("invalid YAML in '{}': {source}", .path.display())]
    Yaml {
        /// Path of the offending document.
        path: PathBuf,
        /// Scanner error, including line and column.
        source: ScanError,
    },

    /// The text is not well-formed JSON.
    #[error("invalid JSON in '{}': {source}", .path.display())]
    Json {
        /// Path of the offending document.
        path: PathBuf,
        /// Parser error, including line and column.
        source: serde_json::Error,
    },

    /// The YAML tree has no JSON equivalent.
    #[error("cannot convert '{}' to JSON: {reason}", .path.display())]
    Conversion {
        /// Path of the offending document.
        path: PathBuf,
        /// What could not be represented.
        reason: String,
    },

    /// Serializing the tree back to JSON text failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Error from the YAML loader, before a file path is attached.
#[derive(Error, Debug)]
pub enum YamlError {
    /// The text is not well-formed YAML.
    #[error(transparent)]
    Syntax(#[from] ScanError),

    /// The YAML tree has no JSON equivalent.
    #[error("{0}")]
    Unrepresentable(String),
}
