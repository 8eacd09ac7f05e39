//! # Error Types
//!
//! [`SchemaError`] covers everything that stops validation from producing
//! an outcome: unreadable files, a missing entry schema, a schema the
//! engine refuses to compile. [`ConfigError`] covers the schema catalog
//! config file.

use std::path::PathBuf;

use thiserror::Error;
use usdm_core::DocumentError;

/// Error that prevents a validation outcome from being produced.
#[derive(Error, Debug)]
pub enum SchemaError {
    /// A schema or instance document could not be loaded.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The OpenAPI document has no `components.schemas.<name>` entry.
    #[error("Schema '{name}' not found in {}", .path.display())]
    SchemaNotFound {
        /// Requested entry schema name.
        name: String,
        /// OpenAPI document that was searched.
        path: PathBuf,
    },

    /// Neither a schema file nor an OpenAPI reference was supplied.
    #[error("No schema provided for validation.")]
    NoSchemaProvided,

    /// The engine could not compile the schema (meta-schema violation or
    /// unresolvable `$ref`).
    #[error("invalid schema '{schema}': {reason}")]
    InvalidSchema {
        /// Schema name or path.
        schema: String,
        /// Engine error message.
        reason: String,
    },
}

/// Error loading the schema catalog config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("cannot read config '{}': {source}", .path.display())]
    Read {
        /// Config file path.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The config file is not valid YAML or has unknown keys.
    #[error("invalid config '{}': {source}", .path.display())]
    Parse {
        /// Config file path.
        path: PathBuf,
        /// Deserialization error.
        source: serde_yaml::Error,
    },

    /// `default_schema_name` was set to an empty string.
    #[error("invalid config '{}': default_schema_name must not be empty", .path.display())]
    EmptySchemaName {
        /// Config file path.
        path: PathBuf,
    },
}
