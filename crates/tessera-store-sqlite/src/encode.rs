//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings. The schema document and the
//! UI descriptor are stored as compact canonical JSON.

use chrono::{DateTime, Utc};
use tessera_core::{
  module::{StoredModule, UiDescriptor},
  schema::Schema,
};

use crate::{Error, Result};

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

pub fn encode_schema(schema: &Schema) -> Result<String> {
  Ok(serde_json::to_string(schema)?)
}

pub fn encode_ui(ui: &UiDescriptor) -> Result<String> {
  Ok(serde_json::to_string(ui)?)
}

/// Raw strings read directly from a `modules` row.
pub struct RawModule {
  pub namespace:   String,
  pub id:          String,
  pub version:     String,
  pub description: String,
  pub schema_json: String,
  pub ui_json:     String,
  pub created_at:  String,
}

impl RawModule {
  pub fn into_module(self) -> Result<StoredModule> {
    Ok(StoredModule {
      namespace:   self.namespace,
      id:          self.id,
      version:     self.version,
      description: self.description,
      schema:      serde_json::from_str(&self.schema_json)?,
      ui:          serde_json::from_str(&self.ui_json)?,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}
