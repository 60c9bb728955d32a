//! The load orchestrator — resolves one definition, version label and mode
//! flag into exactly one of insert, replace or reject.

use crate::{
  Error,
  module::{self, ModuleDefinition, StoredModule},
  store::VersionStore,
};

/// Load one module definition under `version`.
///
/// Outside development mode releases are append-only: publishing a version
/// label that already exists for the identity is a
/// [`Error::VersionConflict`], never a silent overwrite. In development mode
/// the label is a working draft — the previous row for the exact triple is
/// replaced in place, so iterating on an unreleased module does not require
/// a version bump per edit.
///
/// The replace path issues exactly one delete and one insert; the caller's
/// transaction boundary absorbs the case where the insert fails after the
/// delete.
pub fn load_module<S: VersionStore>(
  store: &mut S,
  def: &ModuleDefinition,
  version: &str,
  dev_mode: bool,
) -> Result<StoredModule, S::Error> {
  if !module::is_valid_name(&def.namespace) {
    return Err(Error::InvalidNamespace(def.namespace.clone()).into());
  }
  if !module::is_valid_name(&def.id) {
    return Err(Error::InvalidId(def.id.clone()).into());
  }
  if !module::is_valid_version(version) {
    return Err(Error::InvalidVersion(version.to_owned()).into());
  }

  let released = store.list_versions(&def.namespace, &def.id)?;
  if !released.iter().any(|v| v.version == version) {
    // First publish of this version label.
    return store.insert(def, version);
  }

  if !dev_mode {
    return Err(
      Error::VersionConflict {
        namespace: def.namespace.clone(),
        id:        def.id.clone(),
        version:   version.to_owned(),
      }
      .into(),
    );
  }

  // Development mode. Skip the replace entirely when the stored content
  // already matches the incoming definition.
  if let Some(existing) = store.select(&def.namespace, &def.id, version)? {
    if existing.description == def.description
      && existing.schema == def.schema
      && existing.ui == def.ui
    {
      return Ok(existing);
    }
  }

  store.delete(&def.namespace, &def.id, version)?;
  store.insert(def, version)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
