//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("snapshot load error: {0}")]
  Load(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("internal error: {0}")]
  Internal(String),
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let message = match &self {
      ApiError::Load(e) => e.to_string(),
      ApiError::Internal(m) => m.clone(),
    };
    (
      StatusCode::INTERNAL_SERVER_ERROR,
      Json(json!({ "error": message })),
    )
      .into_response()
  }
}
