//! Handler for `GET /api/diseases`.
//!
//! The Key Diseases tab: every figure is computed over reports restricted
//! to the tracked key-disease codes.

use axum::{Json, extract::State};
use laostat_analytics::{
  BarChart, DensityChart, DonutChart, MapView, StackedArea, aggregate,
  density, geo, series,
};
use laostat_core::SheetSource;
use serde::Serialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct DiseasesResponse {
  pub distribution: DonutChart,
  pub density:      DensityChart,
  pub yearly:       BarChart,
  pub over_time:    StackedArea,
  pub by_province:  BarChart,
  pub map:          MapView,
}

pub async fn handler<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<DiseasesResponse>, ApiError>
where
  S: SheetSource + Send + Sync + 'static,
{
  let snapshot = state.snapshot().await;
  let key = aggregate::key_disease_reports(&snapshot.reports);

  Ok(Json(DiseasesResponse {
    distribution: aggregate::disease_distribution(&key),
    density:      density::case_density_chart(&key),
    yearly:       series::yearly_by_disease(&key),
    over_time:    series::stacked_monthly_by_disease(&key),
    by_province:  series::cases_by_province(&key),
    map:          geo::disease_code_map(&key),
  }))
}
