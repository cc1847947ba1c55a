//! Handler for `GET /api/neighbours`.
//!
//! `countries` is accepted as a comma-separated list; Thailand and Vietnam
//! are selected by default.

use axum::{
  Json,
  extract::{Query, State},
};
use laostat_analytics::{BarChart, HorizontalBars, neighbours};
use laostat_core::SheetSource;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct NeighbourParams {
  /// Comma-separated country names, e.g. `Thailand,Vietnam`.
  pub countries: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NeighboursResponse {
  pub countries:           Vec<String>,
  pub category_by_country: BarChart,
  pub present_diseases:    HorizontalBars,
}

/// `GET /api/neighbours[?countries=Thailand,Vietnam]`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<NeighbourParams>,
) -> Result<Json<NeighboursResponse>, ApiError>
where
  S: SheetSource + Send + Sync + 'static,
{
  let countries: Vec<String> = params
    .countries
    .map(|s| {
      s.split(',')
        .map(|c| c.trim().to_owned())
        .filter(|c| !c.is_empty())
        .collect()
    })
    .unwrap_or_else(|| {
      vec!["Thailand".to_string(), "Vietnam".to_string()]
    });

  let snapshot = state.snapshot().await;
  let cleaned = neighbours::clean(&snapshot.neighbours);
  let selected = neighbours::filter_countries(&cleaned, &countries);

  Ok(Json(NeighboursResponse {
    category_by_country: neighbours::category_by_country(&selected),
    present_diseases: neighbours::present_diseases(&selected),
    countries,
  }))
}
