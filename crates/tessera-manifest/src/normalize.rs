//! Re-encoding of a generic YAML tree into canonical JSON.
//!
//! YAML is a superset of JSON, so the conversion can fail: mapping keys must
//! have an unambiguous string form, floats must be finite, and custom tags
//! have no JSON counterpart.

use serde_json::{Map, Number, Value};
use serde_yaml::Value as Yaml;

use crate::error::{DecodeError, Result};

/// Convert a parsed YAML tree into the canonical JSON value the typed
/// decoder understands.
pub fn to_json(tree: Yaml) -> Result<Value> {
  match tree {
    Yaml::Null => Ok(Value::Null),
    Yaml::Bool(b) => Ok(Value::Bool(b)),
    Yaml::Number(n) => number_to_json(&n),
    Yaml::String(s) => Ok(Value::String(s)),
    Yaml::Sequence(seq) => Ok(Value::Array(
      seq
        .into_iter()
        .map(to_json)
        .collect::<Result<Vec<_>>>()?,
    )),
    Yaml::Mapping(mapping) => {
      let mut object = Map::with_capacity(mapping.len());
      for (key, value) in mapping {
        object.insert(key_to_string(&key)?, to_json(value)?);
      }
      Ok(Value::Object(object))
    }
    Yaml::Tagged(tagged) => Err(DecodeError::Normalize(format!(
      "unsupported YAML tag {}",
      tagged.tag
    ))),
  }
}

fn number_to_json(n: &serde_yaml::Number) -> Result<Value> {
  if let Some(i) = n.as_i64() {
    return Ok(Value::Number(i.into()));
  }
  if let Some(u) = n.as_u64() {
    return Ok(Value::Number(u.into()));
  }
  n.as_f64()
    .and_then(Number::from_f64)
    .map(Value::Number)
    .ok_or_else(|| {
      DecodeError::Normalize(format!("number {n} has no JSON representation"))
    })
}

/// JSON object keys are strings; YAML allows any scalar. Accept the scalar
/// kinds with an unambiguous string form, reject the rest.
fn key_to_string(key: &Yaml) -> Result<String> {
  match key {
    Yaml::String(s) => Ok(s.clone()),
    Yaml::Bool(b) => Ok(b.to_string()),
    Yaml::Number(n) => Ok(n.to_string()),
    other => Err(DecodeError::Normalize(format!(
      "unsupported mapping key: {other:?}"
    ))),
  }
}
