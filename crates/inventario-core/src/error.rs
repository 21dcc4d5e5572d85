//! Error types for `inventario-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A submitted line item could not be applied. The whole batch is
  /// rejected; nothing has been persisted when this is returned.
  #[error("line {index}: {reason}")]
  InvalidLine { index: usize, reason: String },

  #[error("invalid timestamp: {0:?}")]
  InvalidTimestamp(String),
}

impl Error {
  pub(crate) fn invalid_line(index: usize, reason: impl Into<String>) -> Self {
    Error::InvalidLine {
      index,
      reason: reason.into(),
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
