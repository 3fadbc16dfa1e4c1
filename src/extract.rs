// ABOUTME: Attribute extraction from decoded health documents.
// ABOUTME: Walks a dot-separated path through nested JSON objects to a scalar.

use serde_json::Value;
use thiserror::Error;

/// Errors produced while resolving an attribute path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// A segment could not be resolved: either the key is absent or the
    /// node it was looked up in is not an object.
    #[error("attribute '{segment}' not found (resolved so far: '{resolved}')")]
    Path { segment: String, resolved: String },

    /// The path resolved, but to a value that has no string form.
    #[error("attribute '{path}' is {kind}, expected a string, number or boolean")]
    Type { path: String, kind: &'static str },
}

/// Resolve `path` against `document` and return the scalar it points at.
///
/// Strings are returned verbatim, numbers in their JSON form and booleans as
/// `true`/`false`. Objects, arrays and `null` are rejected.
pub fn extract(document: &Value, path: &str) -> Result<String, AttributeError> {
    let mut node = document;
    let mut resolved: Vec<&str> = Vec::new();

    for segment in path.split('.') {
        node = match node {
            Value::Object(map) => map.get(segment),
            _ => None,
        }
        .ok_or_else(|| AttributeError::Path {
            segment: segment.to_string(),
            resolved: resolved.join("."),
        })?;
        resolved.push(segment);
    }

    match node {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(AttributeError::Type {
            path: path.to_string(),
            kind: kind_of(other),
        }),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
