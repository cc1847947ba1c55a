//! The immutable process-wide data snapshot.
//!
//! Handlers receive a cheap `Arc<Snapshot>` clone and read a consistent
//! view for the whole request; refresh swaps the entire snapshot atomically
//! rather than mutating in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  neighbour::NeighbourEvent, news::NewsArticle, report::DiseaseReport,
  report::RegionProfile, weather::WeatherReading,
};

/// Everything the dashboard renders from, loaded in one validated pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
  pub reports:    Vec<DiseaseReport>,
  pub regions:    Vec<RegionProfile>,
  pub weather:    Vec<WeatherReading>,
  pub news:       Vec<NewsArticle>,
  pub neighbours: Vec<NeighbourEvent>,
  /// When this snapshot was loaded from the backend.
  pub fetched_at: DateTime<Utc>,
}
