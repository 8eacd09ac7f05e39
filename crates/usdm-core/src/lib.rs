//! # usdm-core — Document Loading for the USDM Schema Tools
//!
//! Every command in the toolchain starts the same way: read a file, decide
//! whether it is YAML or JSON, and turn it into one in-memory tree. This
//! crate owns that step so that the validator and the converter share it.
//!
//! ## Document Tree
//!
//! Documents are represented as [`serde_json::Value`] with key order
//! preserved. YAML input is read with the YAML 1.1 scalar rules and lands
//! in the same tree, so OpenAPI documents, JSON Schema files and instance
//! data all flow through one type regardless of their on-disk
//! serialization.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `usdm-*` crates (this is the leaf of the DAG).
//! - No process exits and no printing: callers decide how to report errors.
//! - No `.unwrap()` outside tests. `.expect()` only on constant regex
//!   patterns.

pub mod convert;
pub mod document;
pub mod error;
pub mod yaml;

pub use convert::{convert_yaml_file, to_pretty_json, ConvertOutput};
pub use document::{load_document, parse_document, DocumentFormat};
pub use error::{DocumentError, YamlError};
pub use yaml::load_yaml;
