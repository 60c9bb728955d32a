//! Error type for the manifest codec.

use thiserror::Error;

/// A manifest failed to decode. The variant names the stage that rejected
/// the input; no partial definition is produced.
#[derive(Debug, Error)]
pub enum DecodeError {
  /// The source text is not valid YAML.
  #[error("parse manifest: {0}")]
  Parse(#[from] serde_yaml::Error),

  /// The parsed YAML tree has no canonical JSON representation.
  #[error("normalize manifest: {0}")]
  Normalize(String),

  /// The canonical tree does not decode into a module definition.
  #[error("decode module definition: {0}")]
  Typed(#[source] serde_json::Error),
}

pub type Result<T, E = DecodeError> = std::result::Result<T, E>;
