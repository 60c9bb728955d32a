//! Error type for `tessera-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] tessera_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A namespace load failed while processing one module; the enclosing
  /// transaction was rolled back.
  #[error("load module {namespace}:{id}: {source}")]
  Module {
    namespace: String,
    id:        String,
    #[source]
    source:    Box<Error>,
  },
}

impl From<rusqlite::Error> for Error {
  fn from(err: rusqlite::Error) -> Self {
    Error::Database(tokio_rusqlite::Error::Rusqlite(err))
  }
}

impl Error {
  /// True when the error (or the module failure it wraps) is a duplicate
  /// `(namespace, id, version)` release.
  pub fn is_conflict(&self) -> bool {
    match self {
      Error::Core(
        tessera_core::Error::VersionConflict { .. }
        | tessera_core::Error::AlreadyExists { .. },
      ) => true,
      Error::Module { source, .. } => source.is_conflict(),
      _ => false,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
