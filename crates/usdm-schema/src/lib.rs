//! # usdm-schema — Schema Extraction & Validation
//!
//! Checks USDM data files against the published USDM API schemas.
//!
//! ## OpenAPI Entry Schemas (`openapi`)
//!
//! USDM schemas ship as OpenAPI documents. The [`openapi`] module loads such
//! a document and looks up the entry schema under
//! `components.schemas.<name>` (by default `Wrapper-Input`).
//!
//! ## Validation (`validate`)
//!
//! The [`validate`] module hands the instance and the schema to the
//! `jsonschema` engine. For OpenAPI sources the whole document is the
//! resolution root and the entry schema is reached through a
//! `#/components/schemas/<name>` reference, so references between
//! component schemas resolve as they do in the published document.
//! Only the first violation is reported.
//!
//! ## Schema Catalog (`catalog`)
//!
//! Maps schema versions (`v3`, `v4`) to schema files. Built-in defaults can
//! be replaced by a YAML config file.
//!
//! ## Crate Policy
//!
//! - Depends only on `usdm-core` internally.
//! - A failing instance is an outcome, not an error: [`ValidationOutcome`]
//!   carries the violation. [`SchemaError`] is reserved for problems with
//!   the schema or its source.
//! - `$ref` retrieval is local only; the engine never touches the network.

pub mod catalog;
pub mod error;
pub mod openapi;
pub mod validate;

pub use catalog::{SchemaCatalog, SchemaVersion, DEFAULT_SCHEMA_NAME};
pub use error::{ConfigError, SchemaError};
pub use openapi::{EntrySchema, OpenApiDocument};
pub use validate::{
    SchemaDraft, SchemaSource, SchemaValidator, ValidationOutcome, ValidatorOptions, Violation,
};
