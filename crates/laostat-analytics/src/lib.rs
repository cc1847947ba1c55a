//! The laostat transformation pipeline.
//!
//! Pure functions from typed records to chart-spec values. Nothing here
//! touches I/O or retains state; every function takes slices from the
//! current [`Snapshot`] and returns serde-serializable figures for the
//! presentation layer.
//!
//! [`Snapshot`]: laostat_core::Snapshot

pub mod aggregate;
pub mod alerts;
pub mod density;
pub mod figure;
pub mod geo;
pub mod neighbours;
pub mod news;
pub mod palette;
pub mod series;
pub mod weather;

pub use figure::*;
