//! Response envelopes of the collection endpoints.
//!
//! The backend wraps record arrays differently per endpoint (`students`,
//! `teachers`, `parents`, sometimes `data`, sometimes nothing at all). Each
//! endpoint declares the shapes it may return through an [`EnvelopeShape`];
//! anything else is a [`ShapeError`].

use serde_json::Value;

/// Generic wrapper key accepted after the entity-specific one.
pub const DATA_KEY: &str = "data";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unexpected response shape: expected an array under {expected:?}, found {found}")]
pub struct ShapeError {
    pub expected: Vec<&'static str>,
    pub found: String,
}

/// Accepted envelope shapes for one endpoint, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvelopeShape {
    keys: Vec<&'static str>,
    bare_array: bool,
}

impl EnvelopeShape {
    /// `{ <key>: [...] }`, `{ "data": [...] }` or a bare `[...]`.
    pub fn keyed(key: &'static str) -> Self {
        Self {
            keys: vec![key, DATA_KEY],
            bare_array: true,
        }
    }

    /// Only `{ <key>: [...] }`.
    pub fn strict(key: &'static str) -> Self {
        Self {
            keys: vec![key],
            bare_array: false,
        }
    }

    /// Take the record array out of a response body.
    ///
    /// Keys holding `null` are skipped like absent ones; a key holding
    /// anything other than an array is a mismatch.
    pub fn extract(&self, body: Value) -> Result<Vec<Value>, ShapeError> {
        match body {
            Value::Array(records) if self.bare_array => Ok(records),
            Value::Object(mut map) => {
                for key in &self.keys {
                    match map.remove(*key) {
                        None | Some(Value::Null) => {}
                        Some(Value::Array(records)) => return Ok(records),
                        Some(other) => return Err(self.mismatch(&format!("{key}: {}", kind(&other)))),
                    }
                }
                let mut present: Vec<&str> = map.keys().map(String::as_str).collect();
                present.sort_unstable();
                Err(self.mismatch(&format!("object with keys {present:?}")))
            }
            other => Err(self.mismatch(kind(&other))),
        }
    }

    fn mismatch(&self, found: &str) -> ShapeError {
        ShapeError {
            expected: self.keys.clone(),
            found: found.to_owned(),
        }
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
