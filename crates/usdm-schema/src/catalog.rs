//! # Schema Catalog
//!
//! Maps USDM schema versions to the schema files that describe them, and
//! holds the default entry schema name.
//!
//! Built-in defaults:
//!
//! | Version | File                            |
//! |---------|---------------------------------|
//! | `v3`    | `schema/USDM_API_v3.13.0.json`  |
//! | `v4`    | `schema/USDM_API_v4.0.0.json`   |
//!
//! A YAML config file may override both:
//!
//! ```yaml
//! default_schema_name: Wrapper-Input
//! schemas:
//!   v3: schema/USDM_API_v3.11.0.yaml
//!   v4: schema/USDM_API_v4.0.0.json
//! ```
//!
//! A `schemas` table in the config replaces the built-in table entirely;
//! versions it omits have no default schema file. Relative paths resolve
//! against the directory of the config file.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::error::ConfigError;

/// Entry schema used when none is named explicitly.
pub const DEFAULT_SCHEMA_NAME: &str = "Wrapper-Input";

/// Published USDM schema version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaVersion {
    /// USDM API 3.x.
    V3,
    /// USDM API 4.x.
    #[default]
    V4,
}

impl SchemaVersion {
    /// Lowercase label used on the command line and in config files.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V3 => "v3",
            Self::V4 => "v4",
        }
    }
}

impl fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v3" => Ok(Self::V3),
            "v4" => Ok(Self::V4),
            other => Err(format!("unknown schema version '{other}' (expected v3 or v4)")),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    default_schema_name: Option<String>,
    schemas: Option<BTreeMap<SchemaVersion, PathBuf>>,
}

/// Version → schema file table plus the default entry schema name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaCatalog {
    default_schema_name: String,
    schemas: BTreeMap<SchemaVersion, PathBuf>,
}

impl Default for SchemaCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SchemaCatalog {
    /// The built-in table. Paths are relative to the working directory.
    pub fn builtin() -> Self {
        let schemas = BTreeMap::from([
            (SchemaVersion::V3, PathBuf::from("schema/USDM_API_v3.13.0.json")),
            (SchemaVersion::V4, PathBuf::from("schema/USDM_API_v4.0.0.json")),
        ]);
        Self {
            default_schema_name: DEFAULT_SCHEMA_NAME.to_string(),
            schemas,
        }
    }

    /// Load a catalog from a YAML config file, layered over the built-ins.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new(""));
        Self::from_yaml_str(&text, base_dir, path)
    }

    /// Parse config text. `origin` labels errors; relative schema paths
    /// are joined onto `base_dir`.
    pub fn from_yaml_str(text: &str, base_dir: &Path, origin: &Path) -> Result<Self, ConfigError> {
        let mut catalog = Self::builtin();
        if text.trim().is_empty() {
            return Ok(catalog);
        }

        let file: CatalogFile = serde_yaml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;

        if let Some(name) = file.default_schema_name {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptySchemaName {
                    path: origin.to_path_buf(),
                });
            }
            catalog.default_schema_name = name;
        }

        if let Some(schemas) = file.schemas {
            catalog.schemas = schemas
                .into_iter()
                .map(|(version, p)| {
                    let resolved = if p.is_absolute() { p } else { base_dir.join(p) };
                    (version, resolved)
                })
                .collect();
        }

        tracing::debug!(config = %origin.display(), ?catalog, "loaded schema catalog");
        Ok(catalog)
    }

    /// Default schema file for a version, if the catalog has one.
    pub fn schema_path(&self, version: SchemaVersion) -> Option<&Path> {
        self.schemas.get(&version).map(PathBuf::as_path)
    }

    /// Entry schema name used when none is given.
    pub fn default_schema_name(&self) -> &str {
        &self.default_schema_name
    }
}
