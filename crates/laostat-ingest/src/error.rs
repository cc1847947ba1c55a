//! Error types for `laostat-ingest`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("schema error: {0}")]
  Schema(#[from] laostat_core::Error),

  #[error("sheet backend error: {0}")]
  Source(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("CSV error: {0}")]
  Csv(#[from] csv::Error),
}

impl Error {
  /// Wrap an arbitrary backend error.
  pub fn source<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Error::Source(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
