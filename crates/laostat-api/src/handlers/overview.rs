//! Handler for `GET /api/overview`.
//!
//! The landing tab: weather spotlight cards, headline KPIs, the monthly
//! outbreak series and the per-province pie map over the last 100 days.

use axum::{Json, extract::State};
use chrono::Utc;
use laostat_analytics::{
  MapView, TimeSeries, aggregate, geo, series,
  weather::{WeatherCards, spotlight_index, weather_cards},
};
use laostat_core::SheetSource;
use serde::Serialize;

use crate::{AppState, error::ApiError};

/// Window for the overview map, in days.
const RECENT_WINDOW_DAYS: i64 = 100;

#[derive(Debug, Serialize)]
pub struct KpiEntry {
  pub name:    String,
  pub cases:   u64,
  /// Card text, e.g. `"ND (123)"`.
  pub display: String,
}

#[derive(Debug, Serialize)]
pub struct OverviewKpis {
  pub total_cases:   u64,
  pub most_viral:    Option<KpiEntry>,
  pub most_affected: Option<KpiEntry>,
}

#[derive(Debug, Serialize)]
pub struct OverviewResponse {
  pub spotlight: Option<WeatherCards>,
  pub kpis:      OverviewKpis,
  pub outbreak:  TimeSeries,
  pub map:       MapView,
}

fn kpi_entry(entry: Option<(String, u64)>) -> Option<KpiEntry> {
  entry.map(|(name, cases)| KpiEntry {
    display: format!("{name} ({cases})"),
    name,
    cases,
  })
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<OverviewResponse>, ApiError>
where
  S: SheetSource + Send + Sync + 'static,
{
  let snapshot = state.snapshot().await;
  let now = Utc::now();

  let spotlight = spotlight_index(now.timestamp(), snapshot.weather.len())
    .map(|ix| weather_cards(&snapshot.weather[ix]));

  let recent = series::recent_reports(
    &snapshot.reports,
    RECENT_WINDOW_DAYS,
    now.date_naive(),
  );

  Ok(Json(OverviewResponse {
    spotlight,
    kpis: OverviewKpis {
      total_cases:   aggregate::total_cases(&snapshot.reports),
      most_viral:    kpi_entry(aggregate::most_viral(&snapshot.reports)),
      most_affected: kpi_entry(aggregate::most_affected(
        &snapshot.reports,
      )),
    },
    outbreak: series::outbreak_series(&snapshot.reports),
    map: geo::province_pie_map(&recent, state.bounds()),
  }))
}
