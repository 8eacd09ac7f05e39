//! # YAML to JSON Conversion
//!
//! Turns a YAML file into 2-space indented JSON. The output is deterministic:
//! converting the same input twice yields byte-identical text.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::document::{parse_document, DocumentFormat};
use crate::error::DocumentError;

/// Where a conversion sent its JSON.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConvertOutput {
    /// The JSON was written to this file.
    File(PathBuf),
    /// No output path was given; the caller should print this text.
    Stdout(String),
}

/// Render a tree as JSON text indented with two spaces.
///
/// No trailing newline is appended.
pub fn to_pretty_json(value: &Value) -> Result<String, DocumentError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Convert the YAML file at `input` to JSON.
///
/// The input is always decoded as YAML, whatever its extension. With an
/// `output` path the JSON is written there (creating or truncating the
/// file); otherwise it is returned for the caller to print.
///
/// # Errors
///
/// Returns [`DocumentError::Read`] or a parse error for a bad input, and
/// [`DocumentError::Write`] if the output cannot be written.
pub fn convert_yaml_file(
    input: &Path,
    output: Option<&Path>,
) -> Result<ConvertOutput, DocumentError> {
    let content = std::fs::read_to_string(input).map_err(|source| DocumentError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let value = parse_document(&content, DocumentFormat::Yaml, input)?;
    let json = to_pretty_json(&value)?;

    match output {
        Some(path) => {
            std::fs::write(path, json.as_bytes()).map_err(|source| DocumentError::Write {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(
                input = %input.display(),
                output = %path.display(),
                bytes = json.len(),
                "wrote JSON"
            );
            Ok(ConvertOutput::File(path.to_path_buf()))
        }
        None => Ok(ConvertOutput::Stdout(json)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn pretty_json_uses_two_space_indent() {
        let value = json!({"a": 1, "b": [true, null]});
        assert_eq!(
            to_pretty_json(&value).unwrap(),
            "{\n  \"a\": 1,\n  \"b\": [\n    true,\n    null\n  ]\n}"
        );
    }

    #[test]
    fn pretty_json_keeps_non_ascii() {
        let value = json!({"name": "Étude"});
        assert_eq!(to_pretty_json(&value).unwrap(), "{\n  \"name\": \"Étude\"\n}");
    }

    #[test]
    fn convert_flow_style_yaml_to_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.yaml");
        std::fs::write(&input, "{\"a\": 1, \"b\": [true, null]}\n").unwrap();

        let out = convert_yaml_file(&input, None).unwrap();
        assert_eq!(
            out,
            ConvertOutput::Stdout(
                "{\n  \"a\": 1,\n  \"b\": [\n    true,\n    null\n  ]\n}".to_string()
            )
        );
    }

    #[test]
    fn convert_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.yaml");
        let output = dir.path().join("out.json");
        std::fs::write(&input, "name: study\nphases:\n  - 1\n  - 2\n").unwrap();

        let result = convert_yaml_file(&input, Some(&output)).unwrap();
        assert_eq!(result, ConvertOutput::File(output.clone()));

        let written = std::fs::read_to_string(&output).unwrap();
        let parsed: Value = serde_json::from_str(&written).unwrap();
        assert_eq!(parsed, json!({"name": "study", "phases": [1, 2]}));
    }

    #[test]
    fn convert_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.yml");
        let output = dir.path().join("out.json");
        std::fs::write(&input, "b: 2\na:\n  nested: [x, y]\n").unwrap();

        convert_yaml_file(&input, Some(&output)).unwrap();
        let first = std::fs::read(&output).unwrap();
        convert_yaml_file(&input, Some(&output)).unwrap();
        let second = std::fs::read(&output).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn convert_overwrites_existing_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.yaml");
        let output = dir.path().join("out.json");
        std::fs::write(&input, "a: 1\n").unwrap();
        std::fs::write(&output, "stale content that is longer than the result").unwrap();

        convert_yaml_file(&input, Some(&output)).unwrap();
        assert_eq!(std::fs::read_to_string(&output).unwrap(), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn convert_missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert_yaml_file(&dir.path().join("absent.yaml"), None).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }

    #[test]
    fn convert_unwritable_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.yaml");
        std::fs::write(&input, "a: 1\n").unwrap();
        let output = dir.path().join("no-such-dir").join("out.json");

        let err = convert_yaml_file(&input, Some(&output)).unwrap_err();
        assert!(matches!(err, DocumentError::Write { .. }));
    }
}
