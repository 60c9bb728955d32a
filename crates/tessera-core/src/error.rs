//! Error types for `tessera-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The `(namespace, id, version)` triple is already released and the load
  /// ran outside development mode. Releases are append-only.
  #[error("version {version} of module {namespace}:{id} is already released")]
  VersionConflict {
    namespace: String,
    id:        String,
    version:   String,
  },

  /// Storage-level uniqueness violation — the backend's own guard when the
  /// orchestrator's pre-check raced or was bypassed.
  #[error("module {namespace}:{id}@v{version} already exists in the catalog")]
  AlreadyExists {
    namespace: String,
    id:        String,
    version:   String,
  },

  #[error("invalid module id: {0:?}")]
  InvalidId(String),

  #[error("invalid namespace: {0:?}")]
  InvalidNamespace(String),

  #[error("invalid version label: {0:?}")]
  InvalidVersion(String),

  #[error("malformed module coordinate: {0:?}")]
  MalformedRef(String),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
