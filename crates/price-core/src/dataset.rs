//! Dataset representation, parsing and deterministic rendering

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::{Error, Result};

/// Model key → pricing object. Pricing objects are opaque JSON values.
pub type Dataset = BTreeMap<String, Value>;

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

/// Parse a JSON payload that must be an object of model entries.
///
/// `origin` names the payload in error messages ("upstream dataset",
/// "prior output prices.json").
pub fn parse_dataset(bytes: &[u8], origin: &str) -> Result<Dataset> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| Error::parse(origin, e))?;
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(Error::parse(
            origin,
            format!("expected a JSON object, got {}", kind(&other)),
        )),
    }
}

fn canonical(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted: BTreeMap<&String, &Value> = map.iter().collect();
            Value::Object(
                sorted
                    .into_iter()
                    .map(|(k, v)| (k.clone(), canonical(v)))
                    .collect::<Map<String, Value>>(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(canonical).collect()),
        other => other.clone(),
    }
}

/// Render a dataset the way it is persisted: keys sorted at every level,
/// two-space indentation, trailing newline.
///
/// Nested maps are rebuilt in key order so the bytes do not depend on which
/// map backing serde_json was compiled with.
pub fn render_dataset(dataset: &Dataset) -> Result<String> {
    let root: Map<String, Value> = dataset
        .iter()
        .map(|(k, v)| (k.clone(), canonical(v)))
        .collect();
    let mut rendered = serde_json::to_string_pretty(&Value::Object(root))?;
    rendered.push('\n');
    Ok(rendered)
}
