//! Error types for `laostat-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("sheet not found: {0}")]
  MissingSheet(String),

  #[error("sheet {sheet:?} is missing expected column {column:?}")]
  MissingColumn { sheet: String, column: String },

  #[error("sheet {sheet:?} row {row}: invalid number in {column:?}: {value:?}")]
  InvalidNumber {
    sheet:  String,
    row:    usize,
    column: String,
    value:  String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
