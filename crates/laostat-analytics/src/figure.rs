//! Chart-spec types handed to the presentation layer.
//!
//! Plain data, no rendering. A front end (or a test) consumes them as JSON
//! and decides how to draw them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ─── Line / area charts ──────────────────────────────────────────────────────

/// A single dated series, one point per calendar bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimeSeries {
  pub title:  String,
  pub color:  String,
  pub points: Vec<TimeSeriesPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
  /// First day of the bucket.
  pub date:  NaiveDate,
  pub value: u64,
}

/// Cumulative stacked area chart. Layers share the x axis; each layer's
/// `upper` is the running total including itself, so its fill baseline is
/// the previous layer's `upper`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackedArea {
  pub title:  String,
  pub dates:  Vec<NaiveDate>,
  pub layers: Vec<StackedAreaLayer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StackedAreaLayer {
  pub name:   String,
  pub color:  String,
  /// This layer's own contribution per date.
  pub values: Vec<u64>,
  /// Running total including this layer, per date.
  pub upper:  Vec<u64>,
}

// ─── Bar charts ──────────────────────────────────────────────────────────────

/// Multi-series bar chart over shared categories; `stacked` selects stacked
/// vs grouped bar mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarChart {
  pub title:      String,
  pub categories: Vec<String>,
  pub series:     Vec<BarSeries>,
  pub stacked:    bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BarSeries {
  pub name:   String,
  pub color:  String,
  pub values: Vec<f64>,
}

/// Single-series bar chart with a per-bar colour intensity in `[0, 1]`
/// (the weather comparison charts).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScaledBarChart {
  pub title:     String,
  pub labels:    Vec<String>,
  pub values:    Vec<f64>,
  /// Display text per bar, e.g. `"31.5°C"`.
  pub text:      Vec<String>,
  /// Normalized colour position per bar.
  pub intensity: Vec<f64>,
}

/// Horizontal bar chart, smallest value first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizontalBars {
  pub title:  String,
  pub color:  String,
  pub labels: Vec<String>,
  pub values: Vec<u64>,
}

// ─── Donut ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DonutChart {
  pub title:  String,
  pub slices: Vec<DonutSlice>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonutSlice {
  pub label: String,
  pub value: u64,
  pub color: String,
}

// ─── Density ─────────────────────────────────────────────────────────────────

/// Kernel density curves over a shared x grid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensityChart {
  pub title:  String,
  pub curves: Vec<DensityCurve>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DensityCurve {
  pub name:  String,
  pub color: String,
  pub x:     Vec<f64>,
  pub y:     Vec<f64>,
}

// ─── Maps ────────────────────────────────────────────────────────────────────

/// A map panel: centre/bounds plus marker layers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapView {
  pub title:   String,
  pub center:  GeoPoint,
  pub zoom:    f64,
  pub bounds:  Option<MapBounds>,
  pub markers: Vec<MapMarker>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
  pub latitude:  f64,
  pub longitude: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapBounds {
  pub south: f64,
  pub west:  f64,
  pub north: f64,
  pub east:  f64,
}

/// One marker. Pie-map markers carry slices; plain markers leave them empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapMarker {
  pub label:     String,
  pub position:  GeoPoint,
  /// Pixel radius, already scaled and clamped by the producing view.
  pub size:      f64,
  pub color:     String,
  /// Popup body, one entry per line.
  pub popup:     Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub slices:    Vec<DonutSlice>,
}
