//! Response Extractor: recovers a validated `CareerAnalysisResult` from raw model text.
//!
//! # Algorithm
//! 1. Candidate span: first `{` through last `}` inclusive. Surrounding prose
//!    and markdown fences fall outside the span and are ignored.
//! 2. Decode the span into an untyped `serde_json::Value`.
//! 3. Normalize the tree against a static field table: keys are matched
//!    ASCII-case-insensitively and rewritten to their canonical name, unknown keys
//!    are dropped, absent or `null` fields get their zero value.
//! 4. Decode the normalized tree into the typed result.
//!
//! Absence is forgiven, type mismatch is not: a string where a list is expected
//! fails with `MalformedJson`, it is never defaulted.

use serde_json::{Map, Number, Value};
use thiserror::Error;

use crate::models::CareerAnalysisResult;

#[derive(Debug, Error, PartialEq)]
pub enum ExtractError {
    #[error("no JSON object found in model response")]
    NoJsonFound,

    #[error("malformed JSON in model response: {0}")]
    MalformedJson(String),
}

// ────────────────────────────────────────────────────────────────────────────
// Field tables
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Kind {
    Text,
    TextList,
    /// Non-negative decimal.
    Decimal,
    /// Non-negative integer; fractional values are truncated.
    Count,
    Object(&'static [Field]),
    ObjectList(&'static [Field]),
}

#[derive(Debug, Clone, Copy)]
struct Field {
    /// Canonical (serialized) name of the typed field.
    name: &'static str,
    kind: Kind,
}

const fn field(name: &'static str, kind: Kind) -> Field {
    Field { name, kind }
}

const PATH_FIELDS: &[Field] = &[
    field("title", Kind::Text),
    field("requiredSkills", Kind::TextList),
    field("recommendedCertifications", Kind::TextList),
    field("description", Kind::Text),
    field("averageSalary", Kind::Decimal),
    field("jobMarketOutlook", Kind::Text),
];

const STEP_FIELDS: &[Field] = &[
    field("title", Kind::Text),
    field("description", Kind::Text),
    field("resources", Kind::TextList),
    field("estimatedTimeInWeeks", Kind::Count),
];

const ROADMAP_FIELDS: &[Field] = &[
    field("steps", Kind::ObjectList(STEP_FIELDS)),
    field("estimatedTimeInMonths", Kind::Count),
];

const RESULT_FIELDS: &[Field] = &[
    field("recommendedPaths", Kind::ObjectList(PATH_FIELDS)),
    field("skillGaps", Kind::TextList),
    field("recommendedCourses", Kind::TextList),
    field("learningRoadmap", Kind::Object(ROADMAP_FIELDS)),
];

// ────────────────────────────────────────────────────────────────────────────
// Extraction
// ────────────────────────────────────────────────────────────────────────────

/// Returns the candidate JSON span: first `{` through last `}` inclusive.
pub fn candidate_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Extracts a validated analysis result from raw completion text.
pub fn extract(raw: &str) -> Result<CareerAnalysisResult, ExtractError> {
    let span = candidate_span(raw).ok_or(ExtractError::NoJsonFound)?;

    let tree: Value =
        serde_json::from_str(span).map_err(|e| ExtractError::MalformedJson(e.to_string()))?;

    let normalized = normalize_object(tree, RESULT_FIELDS, "")?;

    serde_json::from_value(normalized).map_err(|e| ExtractError::MalformedJson(e.to_string()))
}

fn malformed(path: &str, expected: &str, found: &Value) -> ExtractError {
    let found = match found {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    };
    let path = if path.is_empty() { "<root>" } else { path };
    ExtractError::MalformedJson(format!("{path}: expected {expected}, found {found}"))
}

fn child_path(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}.{name}")
    }
}

/// Removes the first key, in document order, matching `name` case-insensitively.
fn take_field(map: &mut Map<String, Value>, name: &str) -> Option<Value> {
    let key = map.keys().find(|k| k.eq_ignore_ascii_case(name))?.clone();
    map.shift_remove(&key)
}

fn normalize_object(value: Value, fields: &[Field], path: &str) -> Result<Value, ExtractError> {
    let mut map = match value {
        Value::Object(map) => map,
        other => return Err(malformed(path, "object", &other)),
    };

    let mut normalized = Map::with_capacity(fields.len());
    for field in fields {
        let path = child_path(path, field.name);
        let value = match take_field(&mut map, field.name) {
            None | Some(Value::Null) => default_for(field.kind),
            Some(value) => normalize_value(value, field.kind, &path)?,
        };
        normalized.insert(field.name.to_string(), value);
    }

    Ok(Value::Object(normalized))
}

fn default_for(kind: Kind) -> Value {
    match kind {
        Kind::Text => Value::String(String::new()),
        Kind::TextList | Kind::ObjectList(_) => Value::Array(Vec::new()),
        Kind::Decimal | Kind::Count => Value::Number(Number::from(0u32)),
        Kind::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|f| (f.name.to_string(), default_for(f.kind)))
                .collect(),
        ),
    }
}

fn normalize_value(value: Value, kind: Kind, path: &str) -> Result<Value, ExtractError> {
    match kind {
        Kind::Text => match value {
            Value::String(_) => Ok(value),
            other => Err(malformed(path, "string", &other)),
        },
        Kind::TextList => {
            let items = match value {
                Value::Array(items) => items,
                other => return Err(malformed(path, "list of strings", &other)),
            };
            for (i, item) in items.iter().enumerate() {
                if !item.is_string() {
                    return Err(malformed(&format!("{path}[{i}]"), "string", item));
                }
            }
            Ok(Value::Array(items))
        }
        Kind::Decimal => {
            let n = non_negative_number(&value, path)?;
            Number::from_f64(n)
                .map(Value::Number)
                .ok_or_else(|| malformed(path, "finite number", &value))
        }
        Kind::Count => {
            let n = non_negative_number(&value, path)?.trunc();
            if n > f64::from(u32::MAX) {
                return Err(ExtractError::MalformedJson(format!(
                    "{path}: {n} is out of range"
                )));
            }
            Ok(Value::Number(Number::from(n as u32)))
        }
        Kind::Object(fields) => normalize_object(value, fields, path),
        Kind::ObjectList(fields) => {
            let items = match value {
                Value::Array(items) => items,
                other => return Err(malformed(path, "list of objects", &other)),
            };
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| normalize_object(item, fields, &format!("{path}[{i}]")))
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array)
        }
    }
}

fn non_negative_number(value: &Value, path: &str) -> Result<f64, ExtractError> {
    let n = value
        .as_f64()
        .ok_or_else(|| malformed(path, "number", value))?;
    if n < 0.0 {
        return Err(ExtractError::MalformedJson(format!(
            "{path}: expected a non-negative number, found {n}"
        )));
    }
    Ok(n)
}
