//! # YAML 1.1 Loading
//!
//! Builds the JSON tree directly from the `yaml-rust` event stream. Working
//! at the event level keeps the scalar style, so plain scalars can be
//! resolved with the YAML 1.1 rules (`yes` and `off` are booleans, `010` is
//! octal, `1_000` is an integer) while quoted scalars always stay strings.
//!
//! Anchors and aliases are expanded and merge keys (`<<`) are applied.
//! Tags outside the core `!!` set are dropped. Mapping keys must be scalars
//! and are stringified the way a JSON encoder would (`1` as `"1"`, `~` as
//! `"null"`). Non-finite floats have no JSON form and are rejected.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use serde_json::{Map, Number, Value};
use yaml_rust::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust::scanner::{Marker, TScalarStyle, TokenType};

use crate::error::YamlError;

const CORE_TAG_PREFIX: &str = "tag:yaml.org,2002:";

/// Parse the first document of a YAML stream into a JSON tree.
///
/// An empty stream yields `null`.
///
/// # Errors
///
/// Returns [`YamlError::Syntax`] for malformed YAML and
/// [`YamlError::Unrepresentable`] for content with no JSON form.
pub fn load_yaml(text: &str) -> Result<Value, YamlError> {
    let mut builder = TreeBuilder::default();
    Parser::new(text.chars()).load(&mut builder, false)?;
    builder.finish()
}

#[derive(Default)]
struct TreeBuilder {
    stack: Vec<Frame>,
    anchors: HashMap<usize, Value>,
    root: Option<Value>,
    error: Option<String>,
}

enum Frame {
    Sequence {
        items: Vec<Value>,
        anchor: usize,
    },
    Mapping {
        entries: Map<String, Value>,
        key: Option<Key>,
        anchor: usize,
    },
}

enum Key {
    Merge,
    Name(String),
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, event: Event, _mark: Marker) {
        if self.error.is_some() {
            return;
        }
        if let Err(reason) = self.handle(event) {
            self.error = Some(reason);
        }
    }
}

impl TreeBuilder {
    fn handle(&mut self, event: Event) -> Result<(), String> {
        match event {
            Event::Scalar(text, style, anchor, tag) => {
                let merge_key =
                    text == "<<" && tag.is_none() && matches!(style, TScalarStyle::Plain);
                let value = resolve_scalar(&text, style, tag.as_ref())?;
                self.register(anchor, &value);
                self.push(value, merge_key)
            }
            Event::Alias(id) => {
                let value = self
                    .anchors
                    .get(&id)
                    .cloned()
                    .ok_or_else(|| "alias refers to an anchor that encloses it".to_string())?;
                self.push(value, false)
            }
            Event::SequenceStart(anchor) => {
                self.stack.push(Frame::Sequence {
                    items: Vec::new(),
                    anchor,
                });
                Ok(())
            }
            Event::MappingStart(anchor) => {
                self.stack.push(Frame::Mapping {
                    entries: Map::new(),
                    key: None,
                    anchor,
                });
                Ok(())
            }
            Event::SequenceEnd => match self.stack.pop() {
                Some(Frame::Sequence { items, anchor }) => {
                    let value = Value::Array(items);
                    self.register(anchor, &value);
                    self.push(value, false)
                }
                _ => Err("unbalanced sequence end".to_string()),
            },
            Event::MappingEnd => match self.stack.pop() {
                Some(Frame::Mapping {
                    entries, anchor, ..
                }) => {
                    let value = Value::Object(entries);
                    self.register(anchor, &value);
                    self.push(value, false)
                }
                _ => Err("unbalanced mapping end".to_string()),
            },
            _ => Ok(()),
        }
    }

    fn register(&mut self, anchor: usize, value: &Value) {
        // Anchor id 0 means the node has no anchor.
        if anchor > 0 {
            self.anchors.insert(anchor, value.clone());
        }
    }

    fn push(&mut self, value: Value, merge_key: bool) -> Result<(), String> {
        match self.stack.last_mut() {
            None => {
                self.root.get_or_insert(value);
                Ok(())
            }
            Some(Frame::Sequence { items, .. }) => {
                items.push(value);
                Ok(())
            }
            Some(Frame::Mapping { entries, key, .. }) => match key.take() {
                None => {
                    *key = Some(if merge_key {
                        Key::Merge
                    } else {
                        Key::Name(mapping_key(value)?)
                    });
                    Ok(())
                }
                Some(Key::Merge) => merge_into(entries, value),
                Some(Key::Name(name)) => {
                    entries.insert(name, value);
                    Ok(())
                }
            },
        }
    }

    fn finish(self) -> Result<Value, YamlError> {
        match self.error {
            Some(reason) => Err(YamlError::Unrepresentable(reason)),
            None => Ok(self.root.unwrap_or(Value::Null)),
        }
    }
}

fn mapping_key(value: Value) -> Result<String, String> {
    match value {
        Value::String(s) => Ok(s),
        Value::Null => Ok("null".to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(format!("unsupported YAML map key: {other}")),
    }
}

/// Apply a `<<` value: keys already present in the mapping win, and among
/// several merged mappings the earlier one wins.
fn merge_into(entries: &mut Map<String, Value>, source: Value) -> Result<(), String> {
    let sources = match source {
        Value::Object(map) => vec![map],
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(map) => Ok(map),
                _ => Err("merge key list must contain only mappings".to_string()),
            })
            .collect::<Result<Vec<_>, _>>()?,
        _ => return Err("merge key value must be a mapping or a list of mappings".to_string()),
    };
    for map in sources {
        for (k, v) in map {
            entries.entry(k).or_insert(v);
        }
    }
    Ok(())
}

fn core_tag(tag: &TokenType) -> Option<&str> {
    match tag {
        TokenType::Tag(handle, suffix) if handle == "!!" => Some(suffix.as_str()),
        TokenType::Tag(_, suffix) => suffix.strip_prefix(CORE_TAG_PREFIX),
        _ => None,
    }
}

fn resolve_scalar(
    text: &str,
    style: TScalarStyle,
    tag: Option<&TokenType>,
) -> Result<Value, String> {
    match tag.and_then(core_tag) {
        Some("str") => Ok(Value::String(text.to_string())),
        Some("null") => Ok(Value::Null),
        Some("bool") => resolve_bool(text)
            .map(Value::Bool)
            .ok_or_else(|| format!("invalid !!bool value '{text}'")),
        Some("int") if int_pattern().is_match(text) => resolve_int(text),
        Some("float") if float_pattern().is_match(text) || int_pattern().is_match(text) => {
            resolve_float(text)
        }
        Some(kind @ ("int" | "float")) => Err(format!("invalid !!{kind} value '{text}'")),
        Some(_) => Ok(Value::String(text.to_string())),
        None if matches!(style, TScalarStyle::Plain) => resolve_plain(text),
        None => Ok(Value::String(text.to_string())),
    }
}

fn resolve_plain(text: &str) -> Result<Value, String> {
    if matches!(text, "" | "~" | "null" | "Null" | "NULL") {
        return Ok(Value::Null);
    }
    if let Some(b) = resolve_bool(text) {
        return Ok(Value::Bool(b));
    }
    if int_pattern().is_match(text) {
        return resolve_int(text);
    }
    if float_pattern().is_match(text) {
        return resolve_float(text);
    }
    Ok(Value::String(text.to_string()))
}

fn resolve_bool(text: &str) -> Option<bool> {
    match text {
        "yes" | "Yes" | "YES" | "true" | "True" | "TRUE" | "on" | "On" | "ON" => Some(true),
        "no" | "No" | "NO" | "false" | "False" | "FALSE" | "off" | "Off" | "OFF" => Some(false),
        _ => None,
    }
}

fn int_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?:[-+]?0b[0-1_]+|[-+]?0[0-7_]+|[-+]?(?:0|[1-9][0-9_]*)|[-+]?0x[0-9a-fA-F_]+|[-+]?[1-9][0-9_]*(?::[0-5]?[0-9])+)$",
        )
        .expect("YAML 1.1 int pattern compiles")
    })
}

fn float_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(?:[-+]?[0-9][0-9_]*\.[0-9_]*(?:[eE][-+][0-9]+)?|\.[0-9][0-9_]*(?:[eE][-+][0-9]+)?|[-+]?[0-9][0-9_]*(?::[0-5]?[0-9])+\.[0-9_]*|[-+]?\.(?:inf|Inf|INF)|\.(?:nan|NaN|NAN))$",
        )
        .expect("YAML 1.1 float pattern compiles")
    })
}

/// Split off a leading sign and drop `_` separators.
fn sign_and_digits(text: &str) -> (bool, String) {
    let cleaned: String = text.chars().filter(|c| *c != '_').collect();
    match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest.to_string()),
        None => (false, cleaned.trim_start_matches('+').to_string()),
    }
}

fn resolve_int(text: &str) -> Result<Value, String> {
    let (negative, digits) = sign_and_digits(text);
    let out_of_range = || format!("integer '{text}' does not fit in 64 bits");

    let magnitude: i128 = if let Some(bin) = digits.strip_prefix("0b") {
        i128::from_str_radix(bin, 2).map_err(|_| out_of_range())?
    } else if let Some(hex) = digits.strip_prefix("0x") {
        i128::from_str_radix(hex, 16).map_err(|_| out_of_range())?
    } else if digits.contains(':') {
        let mut total: i128 = 0;
        for part in digits.split(':') {
            let part: i128 = part.parse().map_err(|_| out_of_range())?;
            total = total
                .checked_mul(60)
                .and_then(|t| t.checked_add(part))
                .ok_or_else(out_of_range)?;
        }
        total
    } else if digits.len() > 1 && digits.starts_with('0') {
        i128::from_str_radix(&digits[1..], 8).map_err(|_| out_of_range())?
    } else {
        digits.parse().map_err(|_| out_of_range())?
    };

    let value = if negative { -magnitude } else { magnitude };
    if let Ok(i) = i64::try_from(value) {
        Ok(Value::Number(i.into()))
    } else if let Ok(u) = u64::try_from(value) {
        Ok(Value::Number(u.into()))
    } else {
        Err(out_of_range())
    }
}

fn resolve_float(text: &str) -> Result<Value, String> {
    let (negative, digits) = sign_and_digits(text);
    let magnitude: f64 = if digits.contains(':') {
        let mut total = 0.0;
        for part in digits.split(':') {
            let part: f64 = part
                .parse()
                .map_err(|_| format!("invalid float '{text}'"))?;
            total = total * 60.0 + part;
        }
        total
    } else {
        match digits.to_ascii_lowercase().as_str() {
            ".inf" => f64::INFINITY,
            ".nan" => f64::NAN,
            other => other
                .parse()
                .map_err(|_| format!("invalid float '{text}'"))?,
        }
    };
    let value = if negative { -magnitude } else { magnitude };
    Number::from_f64(value)
        .map(Value::Number)
        .ok_or_else(|| format!("cannot represent float {text} in JSON"))
}
