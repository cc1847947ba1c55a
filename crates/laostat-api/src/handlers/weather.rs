//! Handler for `GET /api/weather`.

use axum::{Json, extract::State};
use chrono::Utc;
use laostat_analytics::{
  MapView, ScaledBarChart,
  alerts::{self, WeatherAlert},
  geo,
  weather::{self, WeatherCards},
};
use laostat_core::SheetSource;
use serde::Serialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct WeatherResponse {
  pub map:         MapView,
  pub spotlight:   Option<WeatherCards>,
  pub alerts:      Vec<WeatherAlert>,
  pub temperature: ScaledBarChart,
  pub humidity:    ScaledBarChart,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<WeatherResponse>, ApiError>
where
  S: SheetSource + Send + Sync + 'static,
{
  let snapshot = state.snapshot().await;

  let spotlight = weather::spotlight_index(
    Utc::now().timestamp(),
    snapshot.weather.len(),
  )
  .map(|ix| weather::weather_cards(&snapshot.weather[ix]));

  Ok(Json(WeatherResponse {
    map: geo::weather_map(&snapshot.weather, &snapshot.regions),
    spotlight,
    alerts: alerts::evaluate(&snapshot.weather),
    temperature: weather::temperature_chart(&snapshot.weather),
    humidity: weather::humidity_chart(&snapshot.weather),
  }))
}
