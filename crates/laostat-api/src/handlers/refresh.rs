//! Handler for `POST /api/refresh` and the shared re-fetch path.
//!
//! The same function backs the hourly background task, so the timer and the
//! endpoint cannot drift apart again.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use laostat_core::SheetSource;
use serde::Serialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
  pub fetched_at: DateTime<Utc>,
}

/// Reload the snapshot from the sheet backend and swap it in atomically.
/// In-flight requests keep the snapshot Arc they already cloned.
///
/// Goes through [`fetch_snapshot`], so the configured geocode backfill is
/// applied on every refresh, not only at startup.
///
/// [`fetch_snapshot`]: crate::fetch_snapshot
pub async fn reload<S>(
  state: &AppState<S>,
) -> Result<DateTime<Utc>, ApiError>
where
  S: SheetSource + Send + Sync + 'static,
{
  let source = Arc::clone(&state.source);
  let config = Arc::clone(&state.config);
  let snapshot = tokio::task::spawn_blocking(move || {
    crate::fetch_snapshot(&*source, &config)
  })
  .await
  .map_err(|e| ApiError::Internal(format!("refresh task failed: {e}")))?
  .map_err(|e| ApiError::Load(Box::new(e)))?;

  let fetched_at = snapshot.fetched_at;
  *state.snapshot.write().await = Arc::new(snapshot);
  tracing::info!(%fetched_at, "snapshot refreshed");
  Ok(fetched_at)
}

/// `POST /api/refresh`
pub async fn handler<S>(
  State(state): State<AppState<S>>,
) -> Result<Json<RefreshResponse>, ApiError>
where
  S: SheetSource + Send + Sync + 'static,
{
  let fetched_at = reload(&state).await?;
  Ok(Json(RefreshResponse { fetched_at }))
}
