//! Error type shared by the renderer and its collaborators.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TagError>;

/// Failures raised while resolving groups, listing resources or writing tags.
#[derive(Debug, Error)]
pub enum TagError {
  /// The group model has no group with the requested name.
  #[error("unknown resource group '{name}'")]
  UnknownGroup {
    /// Name that failed to resolve.
    name: String,
  },

  /// Production mode could not find a compressed bundle for a group.
  #[error(
    "no file matching the template '{pattern}' found in the path: {path} - have you built the compressed versions properly?"
  )]
  BundleNotFound {
    /// Expanded file name pattern.
    pattern: String,
    /// Directory that was listed.
    path: String,
  },

  /// The configured name template expanded into an invalid regular expression.
  #[error("invalid bundle name template '{pattern}'")]
  InvalidNameTemplate {
    /// Expanded file name pattern.
    pattern: String,
    /// Underlying regex compilation error.
    #[source]
    source: regex::Error,
  },

  /// A renderer needs at least one tag kind.
  #[error("at least one tag kind must be configured")]
  EmptyTagSet,

  /// A tag kind name could not be parsed.
  #[error("unknown tag kind '{value}'")]
  UnknownTag {
    /// Rejected input.
    value: String,
  },

  /// Configuration file could not be read or parsed.
  #[error("failed to load configuration from {}: {message}", .path.display())]
  Config {
    /// Configuration file path.
    path: PathBuf,
    /// Description of the failure.
    message: String,
  },

  /// Group model is malformed.
  #[error("invalid group model: {message}")]
  Model {
    /// Description of the failure.
    message: String,
  },

  /// Directory listing or output failure.
  #[error(transparent)]
  Io(#[from] std::io::Error),
}

impl TagError {
  pub(crate) fn model(message: impl Into<String>) -> Self {
    Self::Model {
      message: message.into(),
    }
  }
}
