//! Declarative field tables for Gamma entities and the normalize-then-validate pipeline.
//!
//! Every payload goes through two sequential steps:
//!
//! 1. **normalize**: per-field preprocessors rewrite raw JSON in place (e.g. a
//!    string holding `"[\"Yes\",\"No\"]"` becomes a real array).
//! 2. **check**: the normalized value is walked against the field table and every
//!    violation is collected as an [`Issue`] with its path.
//!
//! Only a clean payload is handed to serde for the typed conversion.

use std::fmt;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

pub type Preprocess = fn(Value) -> Value;

#[derive(Debug, Clone, Copy)]
pub enum Kind {
    String,
    Number,
    Bool,
    StringArray,
    Object(&'static [Field]),
    ArrayOf(&'static [Field]),
}

impl Kind {
    fn label(&self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Bool => "boolean",
            Kind::StringArray | Kind::ArrayOf(_) => "array",
            Kind::Object(_) => "object",
        }
    }
}

/// How a key may appear in the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// Present and not null.
    Required,
    /// May be absent; an explicit null is a type violation.
    Optional,
    /// May be absent or null.
    Nullable,
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub kind: Kind,
    pub presence: Presence,
    pub preprocess: Option<Preprocess>,
}

impl Field {
    pub const fn required(name: &'static str, kind: Kind) -> Self {
        Self::new(name, kind, Presence::Required)
    }

    pub const fn optional(name: &'static str, kind: Kind) -> Self {
        Self::new(name, kind, Presence::Optional)
    }

    pub const fn nullable(name: &'static str, kind: Kind) -> Self {
        Self::new(name, kind, Presence::Nullable)
    }

    const fn new(name: &'static str, kind: Kind, presence: Presence) -> Self {
        Self {
            name,
            kind,
            presence,
            preprocess: None,
        }
    }

    /// Run `f` on the raw value before it is checked.
    pub const fn preprocess(self, f: Preprocess) -> Self {
        Self {
            preprocess: Some(f),
            ..self
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub entity: &'static str,
    pub fields: &'static [Field],
}

/// A typed entity backed by a field table. Keys outside the table are kept by the type itself.
pub trait Entity: DeserializeOwned {
    const SCHEMA: Schema;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub path: String,
    pub message: String,
}

impl Issue {
    fn new(path: &str, message: impl Into<String>) -> Self {
        Self {
            path: path.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("invalid {entity} payload: {}", join_issues(.issues))]
pub struct ValidationError {
    pub entity: &'static str,
    pub issues: Vec<Issue>,
}

impl ValidationError {
    /// Issue recorded at `path`, if any.
    pub fn issue_at(&self, path: &str) -> Option<&Issue> {
        self.issues.iter().find(|i| i.path == path)
    }
}

fn join_issues(issues: &[Issue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

pub type Validation<T> = Result<T, ValidationError>;

/// Decode a string holding JSON (upstream encodes some arrays this way).
/// Unparseable strings and non-strings pass through untouched so the type check reports them.
pub fn decode_json_string(value: Value) -> Value {
    match value {
        Value::String(raw) => serde_json::from_str(&raw).unwrap_or(Value::String(raw)),
        other => other,
    }
}

/// Validate a single entity.
pub fn validate<T: Entity>(value: Value) -> Validation<T> {
    run(value, Kind::Object(T::SCHEMA.fields), T::SCHEMA.entity)
}

/// Validate a JSON array of entities. Issue paths are prefixed with the element index.
pub fn validate_list<T: Entity>(value: Value) -> Validation<Vec<T>> {
    run(value, Kind::ArrayOf(T::SCHEMA.fields), T::SCHEMA.entity)
}

fn run<T: DeserializeOwned>(mut value: Value, kind: Kind, entity: &'static str) -> Validation<T> {
    normalize(&mut value, kind);

    let mut issues = Vec::new();
    check(&value, kind, "", &mut issues);
    if !issues.is_empty() {
        return Err(ValidationError { entity, issues });
    }

    serde_json::from_value(value).map_err(|e| ValidationError {
        entity,
        issues: vec![Issue::new("", e.to_string())],
    })
}

fn normalize(value: &mut Value, kind: Kind) {
    match (kind, value) {
        (Kind::Object(fields), Value::Object(map)) => {
            for field in fields {
                if let Some(slot) = map.get_mut(field.name) {
                    if let Some(pre) = field.preprocess {
                        *slot = pre(slot.take());
                    }
                    normalize(slot, field.kind);
                }
            }
        }
        (Kind::ArrayOf(fields), Value::Array(items)) => {
            for item in items {
                normalize(item, Kind::Object(fields));
            }
        }
        _ => {}
    }
}

fn check(value: &Value, kind: Kind, path: &str, issues: &mut Vec<Issue>) {
    match kind {
        Kind::String if value.is_string() => {}
        Kind::Number if value.is_number() => {}
        Kind::Bool if value.is_boolean() => {}
        Kind::StringArray => match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    check(item, Kind::String, &index_path(path, i), issues);
                }
            }
            other => issues.push(mismatch(path, kind, other)),
        },
        Kind::Object(fields) => match value {
            Value::Object(map) => check_fields(map, fields, path, issues),
            other => issues.push(mismatch(path, kind, other)),
        },
        Kind::ArrayOf(fields) => match value {
            Value::Array(items) => {
                for (i, item) in items.iter().enumerate() {
                    check(item, Kind::Object(fields), &index_path(path, i), issues);
                }
            }
            other => issues.push(mismatch(path, kind, other)),
        },
        _ => issues.push(mismatch(path, kind, value)),
    }
}

fn check_fields(map: &Map<String, Value>, fields: &[Field], path: &str, issues: &mut Vec<Issue>) {
    for field in fields {
        let field_path = key_path(path, field.name);
        match (map.get(field.name), field.presence) {
            (None, Presence::Required) => issues.push(Issue::new(&field_path, "Required")),
            (None, _) => {}
            (Some(Value::Null), Presence::Nullable) => {}
            (Some(v), _) => check(v, field.kind, &field_path, issues),
        }
    }
}

fn mismatch(path: &str, kind: Kind, got: &Value) -> Issue {
    Issue::new(
        path,
        format!("Expected {}, received {}", kind.label(), describe(got)),
    )
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn key_path(parent: &str, key: &str) -> String {
    if parent.is_empty() {
        key.to_string()
    } else {
        format!("{parent}.{key}")
    }
}

fn index_path(parent: &str, i: usize) -> String {
    format!("{parent}[{i}]")
}
