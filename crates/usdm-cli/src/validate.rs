//! # Validate Subcommand
//!
//! `usdm validate <json_file>`: check a USDM JSON file against a schema.
//!
//! The schema file is `--schema-file` if given, otherwise the catalog entry
//! for `--schema-version`. A `.json`, `.yaml` or `.yml` schema file is read
//! as an OpenAPI document and `--schema-name` selects the entry schema from
//! `components.schemas`; any other file (or `--standalone`) is used as a
//! plain JSON Schema.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use usdm_schema::{
    SchemaCatalog, SchemaDraft, SchemaError, SchemaSource, SchemaValidator, SchemaVersion,
    ValidationOutcome, ValidatorOptions, Violation,
};

/// USDM schema version selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaVersionArg {
    /// USDM API 3.x.
    V3,
    /// USDM API 4.x.
    V4,
}

impl From<SchemaVersionArg> for SchemaVersion {
    fn from(arg: SchemaVersionArg) -> Self {
        match arg {
            SchemaVersionArg::V3 => SchemaVersion::V3,
            SchemaVersionArg::V4 => SchemaVersion::V4,
        }
    }
}

/// JSON Schema draft selectable on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftArg {
    /// Draft 7.
    Draft7,
    /// Draft 2019-09.
    Draft201909,
    /// Draft 2020-12.
    Draft202012,
}

impl From<DraftArg> for SchemaDraft {
    fn from(arg: DraftArg) -> Self {
        match arg {
            DraftArg::Draft7 => SchemaDraft::Draft7,
            DraftArg::Draft201909 => SchemaDraft::Draft201909,
            DraftArg::Draft202012 => SchemaDraft::Draft202012,
        }
    }
}

/// Arguments for the `usdm validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the JSON file to validate.
    #[arg(value_name = "JSON_FILE")]
    pub json_file: PathBuf,

    /// USDM schema version to use.
    #[arg(long, value_enum, default_value_t = SchemaVersionArg::V4)]
    pub schema_version: SchemaVersionArg,

    /// Path to the schema file (OpenAPI JSON/YAML). Overrides the version default.
    #[arg(long)]
    pub schema_file: Option<PathBuf>,

    /// Schema name to extract from OpenAPI (default: Wrapper-Input).
    #[arg(long)]
    pub schema_name: Option<String>,

    /// Treat the schema file as a plain JSON Schema, even with a .json/.yaml extension.
    #[arg(long)]
    pub standalone: bool,

    /// JSON Schema draft used to interpret the schema.
    #[arg(long, value_enum, default_value_t = DraftArg::Draft202012)]
    pub draft: DraftArg,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 if the instance is valid, 1 on a validation
/// failure, a schema error, a missing entry schema, or no schema at all.
/// Unreadable or malformed files are errors.
pub fn run_validate(args: &ValidateArgs, catalog: &SchemaCatalog) -> Result<u8> {
    let schema_name = args
        .schema_name
        .as_deref()
        .unwrap_or_else(|| catalog.default_schema_name());
    let schema_file = args
        .schema_file
        .as_deref()
        .or_else(|| catalog.schema_path(args.schema_version.into()));

    let source = match SchemaSource::resolve(schema_file, schema_name, args.standalone) {
        Ok(source) => source,
        Err(e @ (SchemaError::SchemaNotFound { .. } | SchemaError::NoSchemaProvided)) => {
            println!("{e}");
            return Ok(1);
        }
        Err(e) => return Err(e).context("failed to load schema"),
    };

    let instance = usdm_core::load_document(&args.json_file)
        .with_context(|| format!("failed to load {}", args.json_file.display()))?;

    let validator = SchemaValidator::new(ValidatorOptions {
        draft: args.draft.into(),
    });

    match validator.validate(&instance, &source) {
        Ok(ValidationOutcome::Valid) => {
            tracing::info!(file = %args.json_file.display(), schema = %source.label(), "valid");
            println!("{}", success_message(&args.json_file, &source));
            Ok(0)
        }
        Ok(ValidationOutcome::Invalid(violation)) => {
            tracing::info!(file = %args.json_file.display(), schema = %source.label(), "invalid");
            println!("{}", failure_report(&violation));
            Ok(1)
        }
        Err(SchemaError::InvalidSchema { reason, .. }) => {
            println!("Schema error: {reason}");
            Ok(1)
        }
        Err(e) => Err(e).context("validation could not run"),
    }
}

/// Confirmation line naming the instance file and the schema.
pub fn success_message(json_file: &Path, source: &SchemaSource) -> String {
    match source {
        SchemaSource::OpenApi { entry, .. } => format!(
            "Validation successful: {} is valid against {} in OpenAPI schema.",
            json_file.display(),
            entry.name()
        ),
        SchemaSource::Standalone { path, .. } => format!(
            "Validation successful: {} is valid against {}",
            json_file.display(),
            path.display()
        ),
    }
}

/// Message, instance location and schema path of a violation, one per line.
pub fn failure_report(violation: &Violation) -> String {
    format!(
        "Validation failed: {}\nLocation in JSON: {}\nSchema path: {}",
        violation.message,
        violation.instance_location(),
        violation.schema_location()
    )
}
