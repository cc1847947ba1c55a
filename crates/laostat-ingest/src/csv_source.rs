//! Concrete [`SheetSource`] backends.
//!
//! [`CsvSheetSource`] reads a directory of `<sheet>.csv` files, standing in
//! for the hosted spreadsheet document. [`MemorySource`] serves sheets from
//! a map and backs the test suites.

use std::{
  collections::HashMap,
  path::{Path, PathBuf},
};

use laostat_core::{Sheet, SheetSource};

use crate::error::Error;

// ─── CSV directory source ────────────────────────────────────────────────────

/// A multi-sheet document laid out as one CSV file per sheet.
#[derive(Debug, Clone)]
pub struct CsvSheetSource {
  dir: PathBuf,
}

impl CsvSheetSource {
  /// Point the source at `dir`. The directory is not scanned up front;
  /// each sheet is read on demand so a refresh picks up edited files.
  pub fn open(dir: impl AsRef<Path>) -> Self {
    Self { dir: dir.as_ref().to_path_buf() }
  }

  fn sheet_path(&self, name: &str) -> PathBuf {
    self.dir.join(format!("{name}.csv"))
  }
}

impl SheetSource for CsvSheetSource {
  type Error = Error;

  fn sheet(&self, name: &str) -> Result<Sheet, Error> {
    let path = self.sheet_path(name);
    if !path.exists() {
      return Err(Error::Schema(laostat_core::Error::MissingSheet(
        name.to_string(),
      )));
    }

    // Ragged rows are common in exported sheets; the typed decode treats
    // absent trailing cells as empty.
    let mut rdr = csv::ReaderBuilder::new()
      .flexible(true)
      .has_headers(false)
      .from_path(&path)?;

    let mut header = Vec::new();
    let mut rows = Vec::new();
    for (i, record) in rdr.records().enumerate() {
      let record = record?;
      let cells: Vec<String> =
        record.iter().map(|c| c.to_string()).collect();
      if i == 0 {
        header = cells;
      } else {
        rows.push(cells);
      }
    }

    Ok(Sheet { name: name.to_string(), header, rows })
  }
}

// ─── In-memory source ────────────────────────────────────────────────────────

/// A [`SheetSource`] backed by a map, used by the test suites.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
  sheets: HashMap<String, Sheet>,
}

impl MemorySource {
  pub fn new() -> Self {
    Self::default()
  }

  /// Insert a sheet built from string slices.
  pub fn with_sheet(
    mut self,
    name: &str,
    header: &[&str],
    rows: &[&[&str]],
  ) -> Self {
    let sheet = Sheet {
      name:   name.to_string(),
      header: header.iter().map(|h| h.to_string()).collect(),
      rows:   rows
        .iter()
        .map(|r| r.iter().map(|c| c.to_string()).collect())
        .collect(),
    };
    self.sheets.insert(name.to_string(), sheet);
    self
  }
}

impl SheetSource for MemorySource {
  type Error = laostat_core::Error;

  fn sheet(&self, name: &str) -> Result<Sheet, laostat_core::Error> {
    self
      .sheets
      .get(name)
      .cloned()
      .ok_or_else(|| laostat_core::Error::MissingSheet(name.to_string()))
  }
}
