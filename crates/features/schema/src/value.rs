//! Helpers for reading document values.

use atria_domain::constants::{ARRAY_KEY, REF_KEY, SPAN};
use serde_json::{Map, Value};

/// Whether a value counts as absent: `null`, `""`, `[]`, or an object holding only
/// system keys (`_type`, `_key`, ...).
#[must_use]
pub fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.iter().all(|(k, v)| k.starts_with('_') || v.is_null()),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// Truthiness of an optional sibling value, as the editor evaluates `!parent?.toggle`.
#[must_use]
pub fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_) | Value::Object(_)) => true,
    }
}

/// The display name of a JSON value's type.
#[must_use]
pub const fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Boolean",
        Value::Number(_) => "Number",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}

/// Follows a dotted path (`hero.heading`) through nested objects.
#[must_use]
pub fn lookup<'a>(object: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = object.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// A short plain-text rendering of a value.
///
/// Rich text yields the concatenated span text of its first block; scalars are
/// stringified; empty values and other shapes yield `None`.
#[must_use]
pub fn plain_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Array(blocks) => block_text(blocks.first()?)?,
        Value::Null | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

fn block_text(block: &Value) -> Option<String> {
    let children = block.get("children")?.as_array()?;
    Some(
        children
            .iter()
            .filter(|c| c.get("_type").and_then(Value::as_str).is_none_or(|t| t == SPAN))
            .filter_map(|c| c.get("text").and_then(Value::as_str))
            .collect(),
    )
}

/// The `_ref` of a reference value.
#[must_use]
pub fn reference_id(value: &Value) -> Option<&str> {
    value.get(REF_KEY).and_then(Value::as_str).filter(|r| !r.is_empty())
}

/// The `_key` of an array item.
#[must_use]
pub fn array_key(value: &Value) -> Option<&str> {
    value.get(ARRAY_KEY).and_then(Value::as_str)
}
