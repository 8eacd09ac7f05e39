//! # OpenAPI Entry Schemas
//!
//! Loads an OpenAPI document and locates a named schema under
//! `components.schemas`. Only that subtree is consulted; the rest of the
//! document is kept intact because it is the `$ref` resolution root.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::SchemaError;

/// A parsed OpenAPI document and the file it came from.
#[derive(Debug, Clone)]
pub struct OpenApiDocument {
    path: PathBuf,
    document: Value,
}

impl OpenApiDocument {
    /// Load an OpenAPI document from a YAML or JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let document = usdm_core::load_document(path)?;
        let doc = Self::from_value(path, document);
        tracing::debug!(
            path = %path.display(),
            schema_count = doc.schema_names().len(),
            "loaded OpenAPI document"
        );
        Ok(doc)
    }

    /// Wrap an already parsed document.
    pub fn from_value(path: impl Into<PathBuf>, document: Value) -> Self {
        Self {
            path: path.into(),
            document,
        }
    }

    /// File the document was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The full document tree.
    pub fn document(&self) -> &Value {
        &self.document
    }

    fn component_schemas(&self) -> Option<&serde_json::Map<String, Value>> {
        self.document
            .get("components")
            .and_then(|c| c.get("schemas"))
            .and_then(Value::as_object)
    }

    /// Names defined under `components.schemas`, in document order.
    pub fn schema_names(&self) -> Vec<&str> {
        self.component_schemas()
            .map(|schemas| schemas.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Look up `components.schemas.<name>`.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaNotFound`] if any step of the path is
    /// missing.
    pub fn entry_schema(&self, name: &str) -> Result<&Value, SchemaError> {
        let schemas = self.component_schemas();
        if schemas.map_or(true, |s| s.is_empty()) {
            tracing::warn!(path = %self.path.display(), "document has no components.schemas");
        }
        schemas
            .and_then(|s| s.get(name))
            .ok_or_else(|| SchemaError::SchemaNotFound {
                name: name.to_string(),
                path: self.path.clone(),
            })
    }
}

/// A named entry point into `components.schemas`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySchema {
    name: String,
    pointer: String,
}

impl EntrySchema {
    /// Build the reference for a schema name.
    ///
    /// The name is escaped as a JSON Pointer token (`~` as `~0`, `/` as
    /// `~1`) and then percent-encoded so that the reference is a valid URI
    /// fragment.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let token = name.replace('~', "~0").replace('/', "~1");
        let pointer = format!("#/components/schemas/{}", encode_fragment(&token));
        Self { name, pointer }
    }

    /// Schema name as given.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// `$ref` value pointing at the schema, e.g. `#/components/schemas/Wrapper-Input`.
    pub fn pointer(&self) -> &str {
        &self.pointer
    }
}

/// Percent-encode every byte not allowed verbatim in a URI fragment.
fn encode_fragment(token: &str) -> String {
    let mut encoded = String::with_capacity(token.len());
    for byte in token.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~!$&'()*+,;=:@".contains(&byte) {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}
