//! Decoding of `get_userinfos` payloads into property rows.
//!
//! Two payload shapes exist in the wild. Hosts that return the rows as a
//! JSON-encoded string need a second parse; hosts that return a structured
//! object carry the rows in a `rows` field. Either way rows may be spelled
//! `{name, value}` or `{propriété, valeur}`, but not both in the same row: a
//! row carrying `name` and `propriété` is rejected as a duplicate field.
//! Both the name and the value must be present.

#[cfg(test)]
#[path = "payload_test.rs"]
mod payload_test;

use serde::Deserialize;
use serde_json::Value;

use super::GatewayError;
use crate::panel::PropertyRow;

/// How the host command shapes its successful response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PayloadShape {
    /// A JSON string holding a JSON array of rows.
    #[default]
    RawJson,
    /// An object with a `rows` array.
    Structured,
}

#[derive(Deserialize)]
struct WireRow {
    #[serde(alias = "propriété")]
    name: String,
    #[serde(alias = "valeur")]
    value: Value,
}

impl From<WireRow> for PropertyRow {
    fn from(row: WireRow) -> Self {
        let value = match row.value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        PropertyRow { name: row.name, value }
    }
}

#[derive(Deserialize)]
struct StructuredPayload {
    rows: Vec<WireRow>,
}

/// Decode a successful response body according to `shape`.
///
/// # Errors
///
/// Returns [`GatewayError::Decode`] when the body does not match the shape
/// or a row lacks a name.
pub fn decode_rows(shape: PayloadShape, body: Value) -> Result<Vec<PropertyRow>, GatewayError> {
    match shape {
        PayloadShape::RawJson => match body {
            Value::String(text) => decode_text(&text),
            other => Err(GatewayError::Decode(format!("expected a JSON string, got {}", json_kind(&other)))),
        },
        PayloadShape::Structured => {
            let payload: StructuredPayload =
                serde_json::from_value(body).map_err(|e| GatewayError::Decode(e.to_string()))?;
            Ok(payload.rows.into_iter().map(PropertyRow::from).collect())
        }
    }
}

/// Decode a JSON array of rows held in text.
///
/// # Errors
///
/// Returns [`GatewayError::Decode`] when `text` is not a JSON array of rows.
pub fn decode_text(text: &str) -> Result<Vec<PropertyRow>, GatewayError> {
    let rows: Vec<WireRow> = serde_json::from_str(text).map_err(|e| GatewayError::Decode(e.to_string()))?;
    Ok(rows.into_iter().map(PropertyRow::from).collect())
}

/// Decode an already-parsed JSON array of rows.
///
/// # Errors
///
/// Returns [`GatewayError::Decode`] when `value` is not an array of rows.
pub fn decode_list(value: Value) -> Result<Vec<PropertyRow>, GatewayError> {
    let rows: Vec<WireRow> = serde_json::from_value(value).map_err(|e| GatewayError::Decode(e.to_string()))?;
    Ok(rows.into_iter().map(PropertyRow::from).collect())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
