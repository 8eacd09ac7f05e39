//! # Schema Validation
//!
//! Validates instance documents against JSON Schema using the `jsonschema`
//! crate (Draft 2020-12 unless configured otherwise).
//!
//! ## Schema Sources
//!
//! - **OpenAPI**: the root schema handed to the engine is the full OpenAPI
//!   document with a top-level `"$ref": "#/components/schemas/<name>"`.
//!   Every other key of the document is left where it is, so references
//!   inside the entry schema resolve against the whole document.
//! - **Standalone**: a JSON Schema file used as-is.
//!
//! ## Reference Resolution
//!
//! References that leave the document are loaded from files next to the
//! schema. The engine only discovers references under JSON Schema keywords,
//! and an OpenAPI document keeps its schemas under `components`, so the
//! root is walked up front and every local target (followed transitively)
//! is registered as a resource before compiling. [`LocalRetriever`] covers
//! whatever the engine still asks for while building its registry. Remote
//! URIs are refused, which surfaces as a schema error when the validator
//! is compiled.
//!
//! ## Reporting
//!
//! Only the first violation the engine reports is kept.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use jsonschema::{Resource, Retrieve, Uri, ValidationOptions, Validator};
use serde_json::Value;

use crate::error::SchemaError;
use crate::openapi::{EntrySchema, OpenApiDocument};

/// JSON Schema draft used to compile schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchemaDraft {
    /// Draft 7.
    Draft7,
    /// Draft 2019-09.
    Draft201909,
    /// Draft 2020-12.
    #[default]
    Draft202012,
}

impl SchemaDraft {
    fn engine_draft(self) -> jsonschema::Draft {
        match self {
            Self::Draft7 => jsonschema::Draft::Draft7,
            Self::Draft201909 => jsonschema::Draft::Draft201909,
            Self::Draft202012 => jsonschema::Draft::Draft202012,
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatorOptions {
    /// Draft used for every schema, regardless of `$schema`.
    pub draft: SchemaDraft,
}

/// What an instance is validated against.
#[derive(Debug, Clone)]
pub enum SchemaSource {
    /// A named entry schema inside an OpenAPI document.
    OpenApi {
        /// The full document; also the `$ref` resolution root.
        document: OpenApiDocument,
        /// Entry schema reference.
        entry: EntrySchema,
    },
    /// A standalone JSON Schema file.
    Standalone {
        /// Schema file path.
        path: PathBuf,
        /// Parsed schema.
        schema: Value,
    },
}

impl SchemaSource {
    /// Select a named schema from an OpenAPI document.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::SchemaNotFound`] if the document has no
    /// `components.schemas.<name>`.
    pub fn open_api(document: OpenApiDocument, name: &str) -> Result<Self, SchemaError> {
        document.entry_schema(name)?;
        Ok(Self::OpenApi {
            document,
            entry: EntrySchema::new(name),
        })
    }

    /// Load a standalone schema file (YAML or JSON by extension).
    pub fn standalone(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let schema = usdm_core::load_document(path)?;
        Ok(Self::Standalone {
            path: path.to_path_buf(),
            schema,
        })
    }

    /// Pick the source for a schema file.
    ///
    /// `.json`, `.yaml` and `.yml` files are OpenAPI documents and the entry
    /// schema `name` is extracted from them, unless `standalone` is set.
    /// Any other file is a standalone schema.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NoSchemaProvided`] when `path` is `None`.
    pub fn resolve(path: Option<&Path>, name: &str, standalone: bool) -> Result<Self, SchemaError> {
        let path = path.ok_or(SchemaError::NoSchemaProvided)?;
        if !standalone && is_openapi_path(path) {
            tracing::debug!(path = %path.display(), schema = name, "using OpenAPI entry schema");
            Self::open_api(OpenApiDocument::load(path)?, name)
        } else {
            tracing::debug!(path = %path.display(), "using standalone schema");
            Self::standalone(path)
        }
    }

    /// Short label: the entry schema name or the schema file path.
    pub fn label(&self) -> String {
        match self {
            Self::OpenApi { entry, .. } => entry.name().to_string(),
            Self::Standalone { path, .. } => path.display().to_string(),
        }
    }

    fn root_schema(&self) -> Value {
        match self {
            Self::OpenApi { document, entry } => {
                let mut root = document.document().clone();
                if let Value::Object(map) = &mut root {
                    map.insert("$ref".to_string(), Value::String(entry.pointer().to_string()));
                }
                root
            }
            Self::Standalone { schema, .. } => schema.clone(),
        }
    }

    fn base_dir(&self) -> PathBuf {
        let file = match self {
            Self::OpenApi { document, .. } => document.path(),
            Self::Standalone { path, .. } => path.as_path(),
        };
        file.parent().map(Path::to_path_buf).unwrap_or_default()
    }
}

fn is_openapi_path(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("json" | "yaml" | "yml")
    )
}

/// Result of validating one instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// The instance conforms.
    Valid,
    /// The first violation reported by the engine.
    Invalid(Violation),
}

impl ValidationOutcome {
    /// True for [`ValidationOutcome::Valid`].
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }
}

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Human-readable description.
    pub message: String,
    /// Keys and indices from the instance root to the offending value.
    pub instance_path: Vec<String>,
    /// Keys from the schema root to the failing keyword.
    pub schema_path: Vec<String>,
}

impl Violation {
    /// Slash-joined instance path, or `<root>` for the document root.
    pub fn instance_location(&self) -> String {
        if self.instance_path.is_empty() {
            "<root>".to_string()
        } else {
            self.instance_path.join("/")
        }
    }

    /// Slash-joined schema path.
    pub fn schema_location(&self) -> String {
        self.schema_path.join("/")
    }

    fn from_engine(error: &jsonschema::ValidationError<'_>) -> Self {
        Self {
            message: error.to_string(),
            instance_path: pointer_segments(&error.instance_path.to_string()),
            schema_path: pointer_segments(&error.schema_path.to_string()),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.instance_location(), self.message)
    }
}

/// Split a JSON Pointer into unescaped tokens.
fn pointer_segments(pointer: &str) -> Vec<String> {
    let Some(tokens) = pointer.strip_prefix('/') else {
        return Vec::new();
    };
    tokens
        .split('/')
        .map(|token| token.replace("~1", "/").replace("~0", "~"))
        .collect()
}

/// Resolves external `$ref`s from local files.
///
/// Handles `file://` URIs and the engine's default base
/// (`json-schema:///<relative>`), which is what a relative reference in a
/// schema without `$id` turns into. Relative paths are taken from the
/// directory of the schema file.
struct LocalRetriever {
    base_dir: PathBuf,
}

impl Retrieve for LocalRetriever {
    fn retrieve(
        &self,
        uri: &Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let uri_str = uri.as_str();
        let path = local_path(uri_str, &self.base_dir)
            .ok_or_else(|| format!("cannot retrieve '{uri_str}': only local files are resolved"))?;
        tracing::debug!(uri = uri_str, path = %path.display(), "retrieving referenced schema");
        Ok(usdm_core::load_document(&path)?)
    }
}

fn local_path(uri: &str, base_dir: &Path) -> Option<PathBuf> {
    let without_fragment = uri.split('#').next().unwrap_or(uri);
    if let Some(rest) = without_fragment.strip_prefix("file://") {
        return Some(PathBuf::from(rest));
    }
    let relative = without_fragment
        .strip_prefix("json-schema:///")?
        .trim_start_matches('/');
    if relative.is_empty() {
        None
    } else {
        Some(base_dir.join(relative))
    }
}

/// Base URI the engine assigns to a root schema without `$id`.
const DEFAULT_BASE_URI: &str = "json-schema:///";

/// Subtrees holding instance data rather than schemas.
fn is_data_keyword(key: &str) -> bool {
    matches!(key, "enum" | "const" | "default" | "example" | "examples")
}

fn collect_refs(value: &Value, base_uri: &str, found: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                match (key.as_str(), child) {
                    ("$ref", Value::String(reference)) => {
                        found.extend(resolve_reference(base_uri, reference));
                    }
                    (key, _) if is_data_keyword(key) => {}
                    _ => collect_refs(child, base_uri, found),
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_refs(item, base_uri, found);
            }
        }
        _ => {}
    }
}

fn has_scheme(reference: &str) -> bool {
    let Some((scheme, _)) = reference.split_once(':') else {
        return false;
    };
    scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Resolve a `$ref` against the URI of the document containing it.
///
/// Returns `None` for same-document fragments and for remote schemes.
fn resolve_reference(base_uri: &str, reference: &str) -> Option<String> {
    let target = reference.split('#').next().unwrap_or(reference);
    if target.is_empty() {
        return None;
    }
    if has_scheme(target) {
        return target.starts_with("file://").then(|| target.to_string());
    }
    let (scheme, base_path) = base_uri.split_once(":///")?;
    let joined = if target.starts_with('/') {
        target.to_string()
    } else {
        let dir = base_path.rfind('/').map_or("", |i| &base_path[..=i]);
        format!("{dir}{target}")
    };
    let mut segments: Vec<&str> = Vec::new();
    for segment in joined.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            other => segments.push(other),
        }
    }
    Some(format!("{scheme}:///{}", segments.join("/")))
}

/// Load every local document reachable through `$ref`s from `root`.
fn external_resources(
    root: &Value,
    base_dir: &Path,
) -> Result<BTreeMap<String, Value>, String> {
    let mut pending = Vec::new();
    collect_refs(root, DEFAULT_BASE_URI, &mut pending);

    let mut loaded = BTreeMap::new();
    while let Some(uri) = pending.pop() {
        if loaded.contains_key(&uri) {
            continue;
        }
        let Some(path) = local_path(&uri, base_dir) else {
            continue;
        };
        let contents = usdm_core::load_document(&path).map_err(|e| e.to_string())?;
        tracing::debug!(uri = %uri, path = %path.display(), "loaded referenced schema");
        collect_refs(&contents, &uri, &mut pending);
        loaded.insert(uri, contents);
    }
    Ok(loaded)
}

/// Validates instances with the `jsonschema` engine.
#[derive(Debug, Clone, Default)]
pub struct SchemaValidator {
    options: ValidatorOptions,
}

impl SchemaValidator {
    /// Create a validator with the given engine options.
    pub fn new(options: ValidatorOptions) -> Self {
        Self { options }
    }

    fn build_options(
        &self,
        source: &SchemaSource,
        root: &Value,
    ) -> Result<ValidationOptions, SchemaError> {
        let invalid = |reason: String| SchemaError::InvalidSchema {
            schema: source.label(),
            reason,
        };
        let base_dir = source.base_dir();

        let mut opts = jsonschema::options();
        opts.with_draft(self.options.draft.engine_draft());
        for (uri, contents) in external_resources(root, &base_dir).map_err(invalid)? {
            let resource = Resource::from_contents(contents)
                .map_err(|e| invalid(format!("{uri}: {e}")))?;
            opts.with_resource(uri, resource);
        }
        opts.with_retriever(LocalRetriever { base_dir });
        Ok(opts)
    }

    /// Compile the schema for a source.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidSchema`] if the engine rejects the
    /// schema or cannot resolve one of its references.
    pub fn build_validator(&self, source: &SchemaSource) -> Result<Validator, SchemaError> {
        let root = source.root_schema();
        self.build_options(source, &root)?
            .build(&root)
            .map_err(|e| SchemaError::InvalidSchema {
                schema: source.label(),
                reason: e.to_string(),
            })
    }

    /// Validate `instance` against `source`.
    ///
    /// A non-conforming instance yields `Ok(ValidationOutcome::Invalid)`;
    /// `Err` means the schema itself could not be used.
    pub fn validate(
        &self,
        instance: &Value,
        source: &SchemaSource,
    ) -> Result<ValidationOutcome, SchemaError> {
        let validator = self.build_validator(source)?;
        let first = validator.iter_errors(instance).next();
        let outcome = match first {
            None => ValidationOutcome::Valid,
            Some(error) => ValidationOutcome::Invalid(Violation::from_engine(&error)),
        };
        tracing::debug!(schema = %source.label(), valid = outcome.is_valid(), "validated instance");
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn openapi(schemas: Value) -> OpenApiDocument {
        OpenApiDocument::from_value(
            "/tmp/usdm/api.json",
            json!({
                "openapi": "3.1.0",
                "info": {"title": "USDM", "version": "4.0.0"},
                "paths": {},
                "components": {"schemas": schemas}
            }),
        )
    }

    fn study_api() -> OpenApiDocument {
        openapi(json!({
            "Wrapper-Input": {
                "type": "object",
                "required": ["study"],
                "properties": {
                    "study": {"$ref": "#/components/schemas/Study-Input"},
                    "usdmVersion": {"type": "string"}
                }
            },
            "Study-Input": {
                "type": "object",
                "required": ["name"],
                "properties": {
                    "name": {"type": "string"},
                    "versions": {
                        "type": "array",
                        "items": {"$ref": "#/components/schemas/StudyVersion-Input"}
                    }
                }
            },
            "StudyVersion-Input": {
                "type": "object",
                "required": ["versionIdentifier"],
                "properties": {
                    "versionIdentifier": {"type": "string"},
                    "instanceType": {"enum": ["StudyVersion"]}
                }
            }
        }))
    }

    fn validate(instance: Value, source: &SchemaSource) -> ValidationOutcome {
        SchemaValidator::default().validate(&instance, source).unwrap()
    }

    #[test]
    fn open_api_valid_instance() {
        let source = SchemaSource::open_api(study_api(), "Wrapper-Input").unwrap();
        let outcome = validate(
            json!({
                "study": {
                    "name": "ACME-001",
                    "versions": [{"versionIdentifier": "1", "instanceType": "StudyVersion"}]
                },
                "usdmVersion": "4.0.0"
            }),
            &source,
        );
        assert_eq!(outcome, ValidationOutcome::Valid);
    }

    #[test]
    fn open_api_missing_top_level_required_is_root() {
        let source = SchemaSource::open_api(study_api(), "Wrapper-Input").unwrap();
        let outcome = validate(json!({"usdmVersion": "4.0.0"}), &source);
        let ValidationOutcome::Invalid(violation) = outcome else {
            panic!("expected a violation");
        };
        assert!(violation.instance_path.is_empty());
        assert_eq!(violation.instance_location(), "<root>");
        assert!(violation.message.contains("study"), "{}", violation.message);
        assert_eq!(violation.schema_path.last().map(String::as_str), Some("required"));
    }

    #[test]
    fn open_api_nested_refs_resolve_against_document() {
        let source = SchemaSource::open_api(study_api(), "Wrapper-Input").unwrap();
        let outcome = validate(
            json!({
                "study": {
                    "name": "ACME-001",
                    "versions": [{"versionIdentifier": "1"}, {"instanceType": "StudyVersion"}]
                }
            }),
            &source,
        );
        let ValidationOutcome::Invalid(violation) = outcome else {
            panic!("expected a violation");
        };
        assert_eq!(violation.instance_location(), "study/versions/1");
        assert!(violation.message.contains("versionIdentifier"));
    }

    #[test]
    fn open_api_type_violation_path() {
        let source = SchemaSource::open_api(study_api(), "Wrapper-Input").unwrap();
        let outcome = validate(json!({"study": {"name": 7}}), &source);
        let ValidationOutcome::Invalid(violation) = outcome else {
            panic!("expected a violation");
        };
        assert_eq!(violation.instance_path, ["study", "name"]);
        assert_eq!(violation.schema_path.last().map(String::as_str), Some("type"));
    }

    #[test]
    fn open_api_enum_violation() {
        let source = SchemaSource::open_api(study_api(), "StudyVersion-Input").unwrap();
        let outcome = validate(
            json!({"versionIdentifier": "1", "instanceType": "Study"}),
            &source,
        );
        assert!(!outcome.is_valid());
    }

    #[test]
    fn open_api_entry_name_with_space() {
        let source = SchemaSource::open_api(
            openapi(json!({"Wrapper Input": {"type": "object", "required": ["study"]}})),
            "Wrapper Input",
        )
        .unwrap();
        assert!(validate(json!({"study": {}}), &source).is_valid());
        assert!(!validate(json!({}), &source).is_valid());
    }

    #[test]
    fn open_api_missing_entry_schema() {
        let err = SchemaSource::open_api(study_api(), "Nope").unwrap_err();
        assert_eq!(err.to_string(), "Schema 'Nope' not found in /tmp/usdm/api.json");
    }

    #[test]
    fn standalone_schema() {
        let source = SchemaSource::Standalone {
            path: PathBuf::from("schema.json"),
            schema: json!({
                "type": "object",
                "required": ["studyVersion"],
                "properties": {"studyTitle": {"type": "string"}}
            }),
        };
        let outcome = validate(json!({"studyTitle": "X"}), &source);
        let ValidationOutcome::Invalid(violation) = outcome else {
            panic!("expected a violation");
        };
        assert_eq!(violation.instance_location(), "<root>");
        assert!(violation.message.contains("studyVersion"));
        assert_eq!(violation.schema_location(), "required");

        assert!(validate(json!({"studyVersion": 1}), &source).is_valid());
    }

    #[test]
    fn standalone_pattern_and_composition() {
        let source = SchemaSource::Standalone {
            path: PathBuf::from("schema.json"),
            schema: json!({
                "oneOf": [
                    {"type": "string", "pattern": "^C[0-9]+$"},
                    {"type": "integer"}
                ]
            }),
        };
        assert!(validate(json!("C123"), &source).is_valid());
        assert!(validate(json!(12), &source).is_valid());
        assert!(!validate(json!("X123"), &source).is_valid());
    }

    #[test]
    fn malformed_schema_is_schema_error() {
        let source = SchemaSource::Standalone {
            path: PathBuf::from("bad.json"),
            schema: json!({"type": 12}),
        };
        let err = SchemaValidator::default()
            .validate(&json!({}), &source)
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSchema { .. }), "got: {err}");
    }

    #[test]
    fn draft7_option_compiles() {
        let validator = SchemaValidator::new(ValidatorOptions {
            draft: SchemaDraft::Draft7,
        });
        let source = SchemaSource::open_api(study_api(), "Wrapper-Input").unwrap();
        let outcome = validator.validate(&json!({}), &source).unwrap();
        assert!(!outcome.is_valid());
    }

    #[test]
    fn resolve_without_path() {
        let err = SchemaSource::resolve(None, "Wrapper-Input", false).unwrap_err();
        assert!(matches!(err, SchemaError::NoSchemaProvided));
        assert_eq!(err.to_string(), "No schema provided for validation.");
    }

    #[test]
    fn resolve_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let api = dir.path().join("api.yaml");
        std::fs::write(
            &api,
            "openapi: 3.0.3\ncomponents:\n  schemas:\n    Wrapper-Input:\n      type: object\n",
        )
        .unwrap();
        let plain = dir.path().join("schema.jsonschema");
        std::fs::write(&plain, "{\"type\": \"object\"}").unwrap();

        let source = SchemaSource::resolve(Some(api.as_path()), "Wrapper-Input", false).unwrap();
        assert!(matches!(source, SchemaSource::OpenApi { .. }));
        assert_eq!(source.label(), "Wrapper-Input");

        let source = SchemaSource::resolve(Some(plain.as_path()), "Wrapper-Input", false).unwrap();
        assert!(matches!(source, SchemaSource::Standalone { .. }));
        assert_eq!(source.label(), plain.display().to_string());

        let source = SchemaSource::resolve(Some(api.as_path()), "ignored", true).unwrap();
        assert!(matches!(source, SchemaSource::Standalone { .. }));
    }

    #[test]
    fn openapi_extensions_are_case_sensitive() {
        assert!(is_openapi_path(Path::new("schema/USDM_API_v4.0.0.json")));
        assert!(is_openapi_path(Path::new("api.yml")));
        assert!(!is_openapi_path(Path::new("schema.JSON")));
        assert!(!is_openapi_path(Path::new("api.Yaml")));
        assert!(!is_openapi_path(Path::new("schema")));
    }

    #[test]
    fn root_schema_injects_entry_ref() {
        let source = SchemaSource::open_api(study_api(), "Study-Input").unwrap();
        let root = source.root_schema();
        assert_eq!(root["$ref"], "#/components/schemas/Study-Input");
        assert_eq!(root["openapi"], "3.1.0");
        assert!(root["components"]["schemas"]["Study-Input"].is_object());
    }

    #[test]
    fn pointer_segments_unescape() {
        assert!(pointer_segments("").is_empty());
        assert_eq!(pointer_segments("/study/versions/0"), ["study", "versions", "0"]);
        assert_eq!(pointer_segments("/a~1b/c~0d"), ["a/b", "c~d"]);
    }

    #[test]
    fn violation_display() {
        let v = Violation {
            message: "\"studyVersion\" is a required property".to_string(),
            instance_path: Vec::new(),
            schema_path: vec!["required".to_string()],
        };
        assert_eq!(v.to_string(), "<root>: \"studyVersion\" is a required property");
    }

    #[test]
    fn reference_resolution_against_base() {
        let base = DEFAULT_BASE_URI;
        assert_eq!(resolve_reference(base, "#/components/schemas/X"), None);
        assert_eq!(
            resolve_reference(base, "codes.json#/Code"),
            Some("json-schema:///codes.json".to_string())
        );
        assert_eq!(
            resolve_reference(base, "./common/codes.yaml"),
            Some("json-schema:///common/codes.yaml".to_string())
        );
        assert_eq!(
            resolve_reference("json-schema:///common/codes.yaml", "../units.json"),
            Some("json-schema:///units.json".to_string())
        );
        assert_eq!(
            resolve_reference("file:///opt/usdm/api.json", "codes.json"),
            Some("file:///opt/usdm/codes.json".to_string())
        );
        assert_eq!(
            resolve_reference(base, "file:///opt/usdm/codes.json"),
            Some("file:///opt/usdm/codes.json".to_string())
        );
        assert_eq!(resolve_reference(base, "https://example.org/s.json"), None);
    }

    #[test]
    fn refs_in_data_keywords_are_ignored() {
        let mut found = Vec::new();
        collect_refs(
            &json!({
                "components": {"schemas": {
                    "A": {"$ref": "a.json"},
                    "B": {"example": {"$ref": "not-a-schema.json"}, "enum": [{"$ref": "x.json"}]}
                }}
            }),
            DEFAULT_BASE_URI,
            &mut found,
        );
        assert_eq!(found, ["json-schema:///a.json"]);
    }

    #[test]
    fn open_api_relative_external_ref() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("codes.json"),
            r#"{"type": "string", "pattern": "^C"}"#,
        )
        .unwrap();
        let document = OpenApiDocument::from_value(
            dir.path().join("api.json"),
            json!({"components": {"schemas": {
                "W": {"properties": {"code": {"$ref": "codes.json"}}}
            }}}),
        );
        let source = SchemaSource::open_api(document, "W").unwrap();

        assert!(validate(json!({"code": "C1"}), &source).is_valid());
        let ValidationOutcome::Invalid(violation) = validate(json!({"code": "X1"}), &source)
        else {
            panic!("expected a violation");
        };
        assert_eq!(violation.instance_location(), "code");
    }

    #[test]
    fn open_api_missing_external_file_is_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        let document = OpenApiDocument::from_value(
            dir.path().join("api.json"),
            json!({"components": {"schemas": {
                "W": {"properties": {"code": {"$ref": "absent.json"}}}
            }}}),
        );
        let source = SchemaSource::open_api(document, "W").unwrap();
        let err = SchemaValidator::default()
            .validate(&json!({}), &source)
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidSchema { .. }), "got: {err}");
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn local_path_mapping() {
        let base = Path::new("/schemas");
        assert_eq!(
            local_path("json-schema:///common.json", base),
            Some(PathBuf::from("/schemas/common.json"))
        );
        assert_eq!(
            local_path("file:///opt/usdm/codes.yaml#/Code", base),
            Some(PathBuf::from("/opt/usdm/codes.yaml"))
        );
        assert_eq!(local_path("https://example.org/schema.json", base), None);
        assert_eq!(local_path("json-schema:///", base), None);
    }
}
