//! Cross-border surveillance records for neighbouring countries.

use serde::{Deserialize, Serialize};

/// Whether the observation concerns a wild or domestic animal population.
/// Rows with any other category value are dropped at load time.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
  Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum HostCategory {
  Wild,
  Domestic,
}

impl HostCategory {
  pub fn parse(s: &str) -> Option<Self> {
    match s.trim() {
      "Wild" => Some(Self::Wild),
      "Domestic" => Some(Self::Domestic),
      _ => None,
    }
  }

  pub fn label(self) -> &'static str {
    match self {
      Self::Wild => "Wild",
      Self::Domestic => "Domestic",
    }
  }
}

/// One semester-level disease-presence observation for a neighbouring
/// country, as published in the regional surveillance bulletin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighbourEvent {
  pub year:            i32,
  /// e.g. `Jan-Jun-2024`; view code rewrites the prefix to `S1-`/`S2-`.
  pub semester:        String,
  pub region:          String,
  pub country:         String,
  /// Cleaned name: surrounding quotes and parenthesised suffixes removed.
  pub disease:         String,
  pub category:        HostCategory,
  pub occurrence_code: String,
  /// e.g. `Present`, `Absent`, `Suspected`.
  pub status:          String,
}
