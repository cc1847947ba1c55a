//! Weather tab views: the rotating region spotlight, comparison charts and
//! the per-region summary cards.

use laostat_core::WeatherReading;
use serde::{Deserialize, Serialize};

use crate::figure::ScaledBarChart;

/// The spotlight rotates to the next region every 30 seconds.
const SPOTLIGHT_PERIOD_SECS: i64 = 30;

/// Index of the spotlight region at `now` (unix seconds).
///
/// The rotation steps back one row after the modulo, wrapping to the last
/// region at zero: `(idx + n - 1) mod n`.
pub fn spotlight_index(now: i64, regions: usize) -> Option<usize> {
  if regions == 0 {
    return None;
  }
  let idx = (now / SPOTLIGHT_PERIOD_SECS) as usize % regions;
  Some((idx + regions - 1) % regions)
}

/// Card payload for the spotlight region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherCards {
  pub region:      String,
  pub temperature: String,
  pub humidity:    String,
  pub pressure:    String,
  pub wind_speed:  String,
  pub visibility:  String,
  pub sunrise:     Option<String>,
  pub sunset:      Option<String>,
}

pub fn weather_cards(reading: &WeatherReading) -> WeatherCards {
  WeatherCards {
    region:      reading.region.clone(),
    temperature: format!("{:.1}°C", reading.temperature),
    humidity:    format!("{:.0}%", reading.humidity),
    pressure:    format!("{:.0} hPa", reading.pressure),
    wind_speed:  format!("{:.1} m/s", reading.wind_speed),
    visibility:  format!("{:.1} km", reading.visibility),
    sunrise:     reading
      .sunrise
      .map(|t| t.format("%H:%M").to_string()),
    sunset:      reading.sunset.map(|t| t.format("%H:%M").to_string()),
  }
}

/// Normalize `values` to `[0, 1]`; a constant slice maps to all zeros.
fn normalized(values: &[f64]) -> Vec<f64> {
  let (min, max) = values.iter().fold(
    (f64::INFINITY, f64::NEG_INFINITY),
    |(lo, hi), &v| (lo.min(v), hi.max(v)),
  );
  let span = max - min;
  values
    .iter()
    .map(|&v| if span > 0.0 { (v - min) / span } else { 0.0 })
    .collect()
}

/// Temperature comparison bars, coloured by relative warmth.
pub fn temperature_chart(readings: &[WeatherReading]) -> ScaledBarChart {
  let values: Vec<f64> = readings.iter().map(|w| w.temperature).collect();
  ScaledBarChart {
    title:     "Temperature by Region (°C)".to_string(),
    labels:    readings.iter().map(|w| w.region.clone()).collect(),
    text:      values.iter().map(|t| format!("{t:.1}°C")).collect(),
    intensity: normalized(&values),
    values,
  }
}

/// Humidity comparison bars.
pub fn humidity_chart(readings: &[WeatherReading]) -> ScaledBarChart {
  let values: Vec<f64> = readings.iter().map(|w| w.humidity).collect();
  ScaledBarChart {
    title:     "Humidity by Region (%)".to_string(),
    labels:    readings.iter().map(|w| w.region.clone()).collect(),
    text:      values.iter().map(|h| format!("{h:.0}%")).collect(),
    intensity: normalized(&values),
    values,
  }
}
