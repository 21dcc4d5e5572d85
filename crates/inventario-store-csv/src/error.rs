//! Error type for `inventario-store-csv`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] inventario_core::Error),

  #[error("csv error in {path:?}: {source}")]
  Csv {
    path:   PathBuf,
    #[source]
    source: csv::Error,
  },

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("blocking task failed: {0}")]
  Join(#[from] tokio::task::JoinError),
}

impl Error {
  pub(crate) fn csv(path: &std::path::Path) -> impl FnOnce(csv::Error) -> Self + '_ {
    move |source| Error::Csv {
      path: path.to_path_buf(),
      source,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
