//! Forward geocoding for report locations with missing coordinates.
//!
//! Wraps the Nominatim search endpoint. Every failure (network, HTTP
//! status, decode, empty result) collapses to `None`, which leaves the
//! affected rows out of geospatial views without aborting the load.

use std::collections::HashMap;

use laostat_core::DiseaseReport;
use serde::Deserialize;

const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
const USER_AGENT: &str = "laostat-location-lookup";

#[derive(Debug, Deserialize)]
struct Place {
  lat: String,
  lon: String,
}

pub struct Geocoder {
  client:   reqwest::blocking::Client,
  base_url: String,
}

impl Geocoder {
  pub fn new() -> Self {
    Self::with_base_url(NOMINATIM_URL)
  }

  /// Point the geocoder at a different endpoint for testing.
  pub fn with_base_url(base_url: impl Into<String>) -> Self {
    let client = reqwest::blocking::Client::builder()
      .user_agent(USER_AGENT)
      .build()
      // The builder only fails on TLS backend misconfiguration.
      .unwrap_or_else(|_| reqwest::blocking::Client::new());
    Self { client, base_url: base_url.into() }
  }

  /// Look up `place`, disambiguated with a ", Laos" suffix.
  pub fn locate(&self, place: &str) -> Option<(f64, f64)> {
    let query = format!("{place}, Laos");
    let response = self
      .client
      .get(&self.base_url)
      .query(&[("q", query.as_str()), ("format", "json"), ("limit", "1")])
      .send()
      .ok()?
      .error_for_status()
      .ok()?;

    let places: Vec<Place> = response.json().ok()?;
    let first = places.first()?;
    let lat = first.lat.parse::<f64>().ok()?;
    let lon = first.lon.parse::<f64>().ok()?;
    Some((lat, lon))
  }
}

impl Default for Geocoder {
  fn default() -> Self {
    Self::new()
  }
}

/// Fill in coordinates for reports whose region join found nothing.
///
/// Lookups are cached per location so each distinct place is queried once.
pub fn backfill_coordinates(reports: &mut [DiseaseReport], geocoder: &Geocoder) {
  let mut cache: HashMap<String, Option<(f64, f64)>> = HashMap::new();

  for report in reports.iter_mut() {
    if report.latitude.is_some() && report.longitude.is_some() {
      continue;
    }
    let coords = cache
      .entry(report.location.clone())
      .or_insert_with(|| {
        let found = geocoder.locate(&report.location);
        if found.is_none() {
          tracing::warn!(location = %report.location, "geocoding failed");
        }
        found
      });
    if let Some((lat, lon)) = *coords {
      report.latitude = Some(lat);
      report.longitude = Some(lon);
    }
  }
}
