//! Module definitions and their persisted form.
//!
//! A module is identified by `(namespace, id)`; each release of its content
//! schema and UI descriptor is a distinct `(namespace, id, version)` row in
//! the catalog. Definitions are immutable once decoded.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, schema::Schema};

// ─── Definition ──────────────────────────────────────────────────────────────

/// A declarative system-module definition, decoded from a manifest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleDefinition {
  /// Stable logical identifier, unique within a namespace.
  pub id:          String,
  /// Partition the module belongs to. Modules in different namespaces never
  /// collide.
  pub namespace:   String,
  /// Human-readable description; may span multiple lines.
  pub description: String,
  /// Shape of the content this module edits.
  pub schema:      Schema,
  /// Rendering descriptor for the module's editor.
  #[serde(deserialize_with = "null_as_default")]
  pub ui:          UiDescriptor,
}

/// Metadata naming the component that renders a module, its parameters, and
/// an optional target field within the content schema.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiDescriptor {
  /// Id of the component to render.
  pub component: String,
  /// Free-form parameters forwarded to the component.
  pub params:    serde_json::Map<String, serde_json::Value>,
  /// Schema field the editable content is written to. Empty means the
  /// content passes through unmodified.
  pub target:    String,
}

/// Manifests may leave a block empty (`ui:` with no value); decode that as
/// the zero-value descriptor rather than an error.
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
  D: serde::Deserializer<'de>,
  T: Default + Deserialize<'de>,
{
  Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ─── Persisted form ──────────────────────────────────────────────────────────

/// One persisted module version — the row shape of the catalog.
///
/// Outside development mode a row is never mutated; a new version is a new
/// row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredModule {
  pub namespace:   String,
  pub id:          String,
  pub version:     String,
  pub description: String,
  pub schema:      Schema,
  pub ui:          UiDescriptor,
  pub created_at:  DateTime<Utc>,
}

impl StoredModule {
  /// The printable coordinate of this row.
  pub fn coordinate(&self) -> ModuleRef {
    ModuleRef {
      namespace: self.namespace.clone(),
      id:        self.id.clone(),
      version:   Some(self.version.clone()),
    }
  }
}

/// One entry of a version listing for a `(namespace, id)` identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionInfo {
  pub version:    String,
  pub created_at: DateTime<Utc>,
}

// ─── Coordinates ─────────────────────────────────────────────────────────────

/// A printable module coordinate: `namespace:id`, optionally `@vX.Y.Z`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleRef {
  pub namespace: String,
  pub id:        String,
  pub version:   Option<String>,
}

impl fmt::Display for ModuleRef {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}:{}", self.namespace, self.id)?;
    if let Some(version) = &self.version {
      write!(f, "@v{version}")?;
    }
    Ok(())
  }
}

impl FromStr for ModuleRef {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let malformed = || Error::MalformedRef(s.to_owned());

    let (identity, version) = match s.split_once('@') {
      Some((identity, tail)) => {
        let version = tail.strip_prefix('v').ok_or_else(malformed)?;
        if !is_valid_version(version) {
          return Err(malformed());
        }
        (identity, Some(version.to_owned()))
      }
      None => (s, None),
    };

    let (namespace, id) = identity.split_once(':').ok_or_else(malformed)?;
    if !is_valid_name(namespace) || !is_valid_name(id) {
      return Err(malformed());
    }

    Ok(Self {
      namespace: namespace.to_owned(),
      id: id.to_owned(),
      version,
    })
  }
}

// ─── Label discipline ────────────────────────────────────────────────────────

/// Module ids and namespaces are lowercase alphanumeric words separated by
/// single hyphens (`story-beats`, `agora`).
pub fn is_valid_name(name: &str) -> bool {
  !name.is_empty()
    && name.split('-').all(|word| {
      !word.is_empty()
        && word
          .chars()
          .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
    })
}

/// Version labels are three dot-separated numeric components (`1.0.0`).
pub fn is_valid_version(version: &str) -> bool {
  let mut components = 0;
  for part in version.split('.') {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
      return false;
    }
    components += 1;
  }
  components == 3
}

// ─── Tests ───────────────────────────────────────────────────────────────────
