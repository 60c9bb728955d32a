//! The structural schema document attached to every module.
//!
//! Covers the JSON-Schema subset the catalog persists: object/array/scalar
//! types, `required` lists, `enum` values, numeric bounds, string
//! constraints and `additionalProperties`. Field semantics are defined for
//! the canonical JSON wire form only; the manifest codec round-trips YAML
//! sources through that form so both notations decode identically.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Schema {
  /// JSON type name: `object`, `array`, `string`, `number`, `integer`,
  /// `boolean` or `null`.
  #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
  pub schema_type: Option<String>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,

  /// Field name → nested schema, for `object` types.
  #[serde(skip_serializing_if = "BTreeMap::is_empty")]
  pub properties: BTreeMap<String, Schema>,

  /// Names of properties that must be present.
  #[serde(skip_serializing_if = "Vec::is_empty")]
  pub required: Vec<String>,

  /// Element schema, for `array` types.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub items: Option<Box<Schema>>,

  /// Ordered list of allowed scalar values.
  #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
  pub enum_values: Vec<Value>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub minimum: Option<f64>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub maximum: Option<f64>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub min_length: Option<u64>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_length: Option<u64>,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub pattern: Option<String>,

  /// `false` forbids fields beyond `properties`; a nested schema constrains
  /// them instead.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub additional_properties: Option<AdditionalProperties>,
}

/// The two wire forms of `additionalProperties`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
  Allowed(bool),
  Constrained(Box<Schema>),
}
