//! The `VersionStore` trait — the four catalog operations.
//!
//! The trait is implemented by storage backends over their own transactional
//! context (e.g. `tessera-store-sqlite` implements it for a borrowed
//! connection). The load orchestrator depends on this abstraction only,
//! which keeps the decision logic testable against an in-memory fake.

use crate::module::{ModuleDefinition, StoredModule, VersionInfo};

/// Abstraction over the persisted module catalog.
///
/// All four operations are blocking and must be issued within one unit of
/// work supplied by the backend; a namespace load that fails partway is
/// rolled back as a whole by that unit of work.
pub trait VersionStore {
  /// Backend error type. The `From<crate::Error>` bound lets the load
  /// orchestrator surface its own failures through any backend.
  type Error: std::error::Error + From<crate::Error> + Send + Sync + 'static;

  /// Create a new row for `(def.namespace, def.id, version)`.
  ///
  /// Must fail with [`crate::Error::AlreadyExists`] when the triple is
  /// already present, independent of any pre-check performed by the caller.
  fn insert(
    &mut self,
    def: &ModuleDefinition,
    version: &str,
  ) -> Result<StoredModule, Self::Error>;

  /// Remove the row for the exact triple. Removing an absent row is a
  /// no-op, not an error.
  fn delete(
    &mut self,
    namespace: &str,
    id: &str,
    version: &str,
  ) -> Result<(), Self::Error>;

  /// Point lookup. A miss is `None`, not an error.
  fn select(
    &mut self,
    namespace: &str,
    id: &str,
    version: &str,
  ) -> Result<Option<StoredModule>, Self::Error>;

  /// Every stored version of the identity, newest first.
  fn list_versions(
    &mut self,
    namespace: &str,
    id: &str,
  ) -> Result<Vec<VersionInfo>, Self::Error>;
}
