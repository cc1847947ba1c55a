//! The `SheetSource` trait and the raw sheet representation.
//!
//! The trait is implemented by spreadsheet backends (e.g. the CSV directory
//! source in `laostat-ingest`). Higher layers depend on this abstraction,
//! not on any concrete backend, so tests can substitute an in-memory source.

use crate::{Error, Result};

// ─── Raw sheet ───────────────────────────────────────────────────────────────

/// An untyped sheet: a header row plus string cells.
///
/// Cells keep whatever the backend produced; all trimming, date coercion and
/// numeric parsing happen in the typed load step.
#[derive(Debug, Clone, Default)]
pub struct Sheet {
  pub name:   String,
  pub header: Vec<String>,
  pub rows:   Vec<Vec<String>>,
}

impl Sheet {
  /// Index of `column` in the header, trimmed and case-insensitive.
  ///
  /// Fails fast with [`Error::MissingColumn`] so a renamed source column is
  /// reported by name at load time rather than deep inside an aggregation.
  pub fn column(&self, column: &str) -> Result<usize> {
    self
      .header
      .iter()
      .position(|h| h.trim().eq_ignore_ascii_case(column))
      .ok_or_else(|| Error::MissingColumn {
        sheet:  self.name.clone(),
        column: column.to_string(),
      })
  }

  /// Cell at (`row`, `col`), empty string when the row is ragged.
  pub fn cell<'a>(&self, row: &'a [String], col: usize) -> &'a str {
    row.get(col).map(String::as_str).unwrap_or("")
  }

  /// True when every cell in `row` is blank after trimming.
  pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a multi-sheet spreadsheet document queried by sheet name.
pub trait SheetSource {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Fetch the named sheet. Unknown names are an error, not an empty sheet.
  fn sheet(&self, name: &str) -> Result<Sheet, Self::Error>;
}
