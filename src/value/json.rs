//! Bridge between the wire tree and `serde_json`.
//!
//! Conversion semantics:
//! - JSON to [`Value`] is total: every JSON document maps cleanly
//! - [`Value`] to JSON omits record fields that are `Undefined`
//! - `Undefined` anywhere else has no JSON form and is rejected
//! - Non-finite numbers have no JSON form and are rejected

use thiserror::Error;

use super::Value;

/// Errors converting a [`Value`] into a `serde_json::Value`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsonError {
    /// An `Undefined` occurred outside a record field position.
    #[error("undefined has no JSON representation outside record fields")]
    UnrepresentableUndefined,

    /// A number was NaN or infinite.
    #[error("non-finite number {0} has no JSON representation")]
    NonFiniteNumber(String),
}

impl Value {
    /// Converts a parsed JSON document into a wire value.
    ///
    /// This is the supported entry point for callers that read persisted
    /// text: parse with `serde_json`, convert, then `validate` against a
    /// schema before decoding.
    pub fn from_json(json: serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                // Infallible without serde_json's arbitrary_precision
                // feature, which this crate does not enable.
                Value::Number(n.as_f64().expect("JSON number converts to f64"))
            }
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(fields) => Value::Record(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Converts a wire value into a JSON document.
    ///
    /// Record fields holding `Undefined` are omitted, mirroring how
    /// `optional` fields encode. An `Undefined` in any other position, or a
    /// non-finite number, fails with [`JsonError`].
    pub fn to_json(&self) -> Result<serde_json::Value, JsonError> {
        match self {
            Value::Null => Ok(serde_json::Value::Null),
            Value::Undefined => Err(JsonError::UnrepresentableUndefined),
            Value::Bool(b) => Ok(serde_json::Value::Bool(*b)),
            Value::Number(n) => serde_json::Number::from_f64(*n)
                .map(serde_json::Value::Number)
                .ok_or_else(|| JsonError::NonFiniteNumber(n.to_string())),
            Value::String(s) => Ok(serde_json::Value::String(s.clone())),
            Value::Array(items) => {
                let mut out = Vec::with_capacity(items.len());
                for item in items {
                    out.push(item.to_json()?);
                }
                Ok(serde_json::Value::Array(out))
            }
            Value::Record(fields) => {
                let mut out = serde_json::Map::new();
                for (key, value) in fields {
                    if matches!(value, Value::Undefined) {
                        continue;
                    }
                    out.insert(key.clone(), value.to_json()?);
                }
                Ok(serde_json::Value::Object(out))
            }
        }
    }
}
