//! Sheet ingestion for laostat.
//!
//! Converts raw [`Sheet`] grids from a [`SheetSource`] backend into the
//! typed records of `laostat-core`. Pure synchronous; no async runtime.
//!
//! Pipeline:
//!   SheetSource::sheet(name)
//!     └─ normalize (trim headers, drop blank rows)
//!          └─ column-validated typed decode → entity rows
//!               └─ region join / category filters
//!                    └─ Snapshot
//!
//! [`Sheet`]: laostat_core::Sheet
//! [`SheetSource`]: laostat_core::SheetSource

pub mod csv_source;
pub mod error;
pub mod geocode;
pub mod load;
pub mod normalize;

#[cfg(test)]
mod tests;

pub use csv_source::{CsvSheetSource, MemorySource};
pub use error::{Error, Result};
pub use geocode::Geocoder;
pub use load::load_snapshot;
