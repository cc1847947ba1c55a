//! Handler for `GET /api/news`.
//!
//! `search` filters by case-insensitive substring over title and body; no
//! parameter (or a blank one) returns every article.

use axum::{
  Json,
  extract::{Query, State},
};
use chrono::Utc;
use laostat_analytics::news::{self, NewsMetrics, SearchOutcome};
use laostat_core::{NewsArticle, SheetSource};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize, Default)]
pub struct NewsParams {
  pub search: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewsResponse {
  pub metrics:  NewsMetrics,
  pub articles: Vec<NewsArticle>,
  /// Set only when a query matched nothing.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub message:  Option<String>,
}

/// `GET /api/news[?search=...]`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<NewsParams>,
) -> Result<Json<NewsResponse>, ApiError>
where
  S: SheetSource + Send + Sync + 'static,
{
  let snapshot = state.snapshot().await;
  let metrics =
    news::metrics(&snapshot.news, Utc::now().date_naive());

  let query = params.search.unwrap_or_default();
  let (articles, message) = match news::search(&snapshot.news, &query) {
    SearchOutcome::Matches { articles } => (articles, None),
    SearchOutcome::NoMatches => {
      (Vec::new(), Some("No articles found.".to_string()))
    }
  };

  Ok(Json(NewsResponse { metrics, articles, message }))
}
