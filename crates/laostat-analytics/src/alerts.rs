//! Threshold alerts over the latest weather snapshot.
//!
//! Stateless: every evaluation re-derives alerts from the readings it is
//! given. No hysteresis, no alert history.

use laostat_core::WeatherReading;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
  HighTemperature,
  LowTemperature,
  HighHumidity,
  StrongWind,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherAlert {
  pub region:  String,
  pub kind:    AlertKind,
  pub message: String,
}

/// Fixed thresholds, all strict comparisons. The two temperature alerts are
/// mutually exclusive; humidity and wind trigger independently, so one
/// region can emit up to three alerts.
pub fn evaluate(readings: &[WeatherReading]) -> Vec<WeatherAlert> {
  let mut alerts = Vec::new();

  for w in readings {
    if w.temperature > 35.0 {
      alerts.push(WeatherAlert {
        region:  w.region.clone(),
        kind:    AlertKind::HighTemperature,
        message: format!(
          "High Temperature Alert: {} - {:.1}°C",
          w.region, w.temperature
        ),
      });
    } else if w.temperature < 10.0 {
      alerts.push(WeatherAlert {
        region:  w.region.clone(),
        kind:    AlertKind::LowTemperature,
        message: format!(
          "Low Temperature Alert: {} - {:.1}°C",
          w.region, w.temperature
        ),
      });
    }

    if w.humidity > 90.0 {
      alerts.push(WeatherAlert {
        region:  w.region.clone(),
        kind:    AlertKind::HighHumidity,
        message: format!(
          "High Humidity Alert: {} - {:.0}%",
          w.region, w.humidity
        ),
      });
    }

    if w.wind_speed > 10.0 {
      alerts.push(WeatherAlert {
        region:  w.region.clone(),
        kind:    AlertKind::StrongWind,
        message: format!(
          "Strong Wind Alert: {} - {:.1} m/s",
          w.region, w.wind_speed
        ),
      });
    }
  }

  alerts
}
