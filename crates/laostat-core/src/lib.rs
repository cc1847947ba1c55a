//! Core types for the laostat surveillance dashboard.
//!
//! This crate is deliberately free of HTTP and I/O dependencies. It defines
//! the typed records that replace the source spreadsheet's stringly-keyed
//! columns, the [`SheetSource`] seam over the spreadsheet backend, and the
//! immutable [`Snapshot`] every request handler reads from.

pub mod error;
pub mod neighbour;
pub mod news;
pub mod report;
pub mod snapshot;
pub mod source;
pub mod weather;

pub use error::{Error, Result};
pub use neighbour::{HostCategory, NeighbourEvent};
pub use news::NewsArticle;
pub use report::{DiseaseReport, RegionProfile};
pub use snapshot::Snapshot;
pub use source::{Sheet, SheetSource};
pub use weather::WeatherReading;
