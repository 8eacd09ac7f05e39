//! # usdm-cli — USDM Schema Tools CLI
//!
//! Provides the `usdm` command-line interface.
//!
//! ## Subcommands
//!
//! - `usdm convert`: YAML to 2-space indented JSON, to a file or stdout.
//! - `usdm validate`: check a JSON file against a USDM schema version,
//!   an explicit OpenAPI document, or a standalone JSON Schema.
//!
//! ```bash
//! usdm convert schema/USDM_API_v3.11.0.yaml -o schema/USDM_API_v3.11.0.json
//! usdm validate my_usdm.json --schema-version v3
//! usdm validate my_usdm.json --schema-file schema/USDM_API_v4.0.0.json --schema-name Wrapper-Input
//! ```
//!
//! ## Exit Codes
//!
//! Handlers return the exit code instead of exiting: 0 on success, 1 on a
//! validation failure, a schema problem, or any operational error.
//!
//! ## Crate Policy
//!
//! - Argument parsing lives here; loading, conversion and validation live
//!   in `usdm-core` and `usdm-schema`.
//! - User-facing results go to stdout; logs go to stderr.

pub mod convert;
pub mod validate;

use std::path::Path;

use anyhow::{Context, Result};
use usdm_schema::SchemaCatalog;

/// Build the schema catalog: built-in defaults, overridden by `config` when given.
pub fn load_catalog(config: Option<&Path>) -> Result<SchemaCatalog> {
    match config {
        Some(path) => SchemaCatalog::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(SchemaCatalog::builtin()),
    }
}
