//! Weather readings, one row per region per poll.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReading {
  pub region:      String,
  pub timestamp:   Option<NaiveDateTime>,
  /// Degrees Celsius.
  pub temperature: f64,
  pub feels_like:  f64,
  /// Relative humidity, percent.
  pub humidity:    f64,
  /// Hectopascals.
  pub pressure:    f64,
  /// Metres per second.
  pub wind_speed:  f64,
  /// Kilometres.
  pub visibility:  f64,
  pub description: String,
  pub sunrise:     Option<NaiveDateTime>,
  pub sunset:      Option<NaiveDateTime>,
}
