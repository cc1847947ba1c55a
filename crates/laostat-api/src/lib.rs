//! JSON API for the laostat dashboard.
//!
//! Exposes an axum [`Router`] backed by any [`SheetSource`] spreadsheet
//! backend. One route per dashboard tab plus a health check and an explicit
//! refresh operation; the UI layer consumes the chart-spec JSON and stays
//! out of this repository.

pub mod error;
pub mod handlers;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use laostat_analytics::{MapBounds, geo};
use laostat_core::{SheetSource, Snapshot};
use laostat_ingest::{Geocoder, geocode, load_snapshot};
use serde::Deserialize;
use tokio::sync::RwLock;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

// ─── Configuration ───────────────────────────────────────────────────────────

fn default_host() -> String {
  "127.0.0.1".to_string()
}

fn default_port() -> u16 {
  8050
}

fn default_refresh_interval() -> u64 {
  3600
}

/// Runtime server configuration, deserialised from `config.toml` with a
/// `LAOSTAT_`-prefixed environment overlay.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host: String,
  #[serde(default = "default_port")]
  pub port: u16,
  /// Directory containing one `<sheet>.csv` per source sheet.
  pub data_dir: PathBuf,
  /// Province boundary polygon used for map bounds.
  pub geojson_path: Option<PathBuf>,
  /// Seconds between background snapshot refreshes; `0` disables the task.
  #[serde(default = "default_refresh_interval")]
  pub refresh_interval_secs: u64,
  /// Geocode report locations the region join could not resolve.
  #[serde(default)]
  pub geocode_missing: bool,
  /// Alternative geocoding endpoint; defaults to the public Nominatim API.
  #[serde(default)]
  pub geocode_url: Option<String>,
}

// ─── Snapshot loading ────────────────────────────────────────────────────────

/// Load a snapshot from `source`, applying the configured geocode backfill.
///
/// Blocking; both startup and the refresh path call this off the async
/// runtime, so a refresh never loses coordinates the backfill produced.
pub fn fetch_snapshot<S>(
  source: &S,
  config: &ServerConfig,
) -> Result<Snapshot, laostat_ingest::Error>
where
  S: SheetSource,
{
  let mut snapshot = load_snapshot(source)?;
  if config.geocode_missing {
    let geocoder = match &config.geocode_url {
      Some(url) => Geocoder::with_base_url(url.clone()),
      None => Geocoder::new(),
    };
    geocode::backfill_coordinates(&mut snapshot.reports, &geocoder);
  }
  Ok(snapshot)
}

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
///
/// The snapshot is replaced wholesale on refresh; handlers clone the inner
/// `Arc` once and read a consistent view for the rest of the request.
pub struct AppState<S> {
  pub source:   Arc<S>,
  pub snapshot: Arc<RwLock<Arc<Snapshot>>>,
  pub boundary: Arc<Option<serde_json::Value>>,
  pub config:   Arc<ServerConfig>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self {
      source:   Arc::clone(&self.source),
      snapshot: Arc::clone(&self.snapshot),
      boundary: Arc::clone(&self.boundary),
      config:   Arc::clone(&self.config),
    }
  }
}

impl<S> AppState<S> {
  pub fn new(
    source: S,
    snapshot: Snapshot,
    boundary: Option<serde_json::Value>,
    config: ServerConfig,
  ) -> Self {
    Self {
      source:   Arc::new(source),
      snapshot: Arc::new(RwLock::new(Arc::new(snapshot))),
      boundary: Arc::new(boundary),
      config:   Arc::new(config),
    }
  }

  /// The current immutable snapshot.
  pub async fn snapshot(&self) -> Arc<Snapshot> {
    self.snapshot.read().await.clone()
  }

  /// Map bounds derived from the configured boundary polygon, if any.
  pub fn bounds(&self) -> Option<MapBounds> {
    self
      .boundary
      .as_ref()
      .as_ref()
      .and_then(geo::bounds_from_geojson)
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the API router for `state`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: SheetSource + Send + Sync + 'static,
{
  Router::new()
    .route("/health", get(health))
    .route("/api/overview", get(handlers::overview::handler::<S>))
    .route("/api/diseases", get(handlers::diseases::handler::<S>))
    .route("/api/neighbours", get(handlers::neighbours::handler::<S>))
    .route("/api/weather", get(handlers::weather::handler::<S>))
    .route("/api/news", get(handlers::news::handler::<S>))
    .route("/api/refresh", post(handlers::refresh::handler::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

/// `GET /health`: fixed status text for load balancers.
async fn health() -> &'static str {
  "OK"
}

// ─── Integration tests ───────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode},
  };
  use laostat_ingest::{MemorySource, load_snapshot};
  use tower::ServiceExt as _;

  fn fixture_source() -> MemorySource {
    MemorySource::new()
      .with_sheet(
        "laos_regions",
        &["province", "capital", "latitude", "longitude"],
        &[&["Vientiane Province", "Vientiane", "17.97", "102.6"]],
      )
      .with_sheet(
        "laos_data",
        &["reported_date", "province", "location", "disease_code", "case"],
        &[
          &["2024-03-02", "Vientiane Province", "Vientiane", "HPAI-P", "4"],
          &["2024-04-15", "Vientiane Province", "Vientiane", "ND", "9"],
        ],
      )
      .with_sheet(
        "weather_data",
        &[
          "region", "timestamp", "temperature", "feels_like", "humidity",
          "pressure", "wind_speed", "visibility", "description", "sunrise",
          "sunset",
        ],
        &[&[
          "Vientiane",
          "02/03/2024 14:00",
          "36.5",
          "39.0",
          "95",
          "1009",
          "3.2",
          "10.0",
          "scattered clouds",
          "02/03/2024 06:21",
          "02/03/2024 18:12",
        ]],
      )
      .with_sheet(
        "news_data",
        &["title", "date", "tag", "main_text", "image_url", "url"],
        &[
          &[
            "Outbreak contained",
            "2024-06-10",
            "Press Release",
            "Officials report progress.",
            "",
            "",
          ],
          &[
            "Weekly digest",
            "2024-06-03",
            "Newsletter",
            "Roundup of events.",
            "",
            "",
          ],
        ],
      )
      .with_sheet(
        "neighbours_data",
        &[
          "Year", "Semester", "Region", "Country", "Disease", "Category",
          "Occurrence Code", "Disease status",
        ],
        &[
          &[
            "2024", "Jan-Jun-2024", "Asia", "Thailand", "ND", "Wild", "+",
            "Present",
          ],
          &[
            "2023", "Jan-Jun-2023", "Asia", "Thailand", "AI", "Wild", "+",
            "Present",
          ],
          &[
            "2024", "Jan-Jun-2024", "Asia", "Vietnam", "AI", "Domestic",
            "+", "Present",
          ],
        ],
      )
  }

  fn test_config() -> ServerConfig {
    ServerConfig {
      host: "127.0.0.1".to_string(),
      port: 8050,
      data_dir: PathBuf::from("unused"),
      geojson_path: None,
      refresh_interval_secs: 0,
      geocode_missing: false,
      geocode_url: None,
    }
  }

  fn make_state() -> AppState<MemorySource> {
    let source = fixture_source();
    let snapshot = load_snapshot(&source).unwrap();
    AppState::new(source, snapshot, None, test_config())
  }

  async fn get_json(
    state: AppState<MemorySource>,
    uri: &str,
  ) -> (StatusCode, serde_json::Value) {
    let response = router(state)
      .oneshot(
        Request::builder()
          .uri(uri)
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    let status = response.status();
    let bytes =
      axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();
    let value =
      serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, value)
  }

  // ── Health ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn health_returns_fixed_text() {
    let response = router(make_state())
      .oneshot(
        Request::builder()
          .uri("/health")
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes =
      axum::body::to_bytes(response.into_body(), 1024).await.unwrap();
    assert_eq!(&bytes[..], b"OK");
  }

  // ── Overview ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn overview_reports_kpis() {
    let (status, body) = get_json(make_state(), "/api/overview").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["kpis"]["total_cases"], 13);
    assert_eq!(body["kpis"]["most_viral"]["name"], "ND");
    assert_eq!(body["kpis"]["most_viral"]["display"], "ND (9)");
    assert_eq!(body["kpis"]["most_affected"]["name"], "Vientiane");
  }

  // ── Diseases ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn diseases_tab_restricts_to_key_codes() {
    let (status, body) = get_json(make_state(), "/api/diseases").await;
    assert_eq!(status, StatusCode::OK);
    let labels: Vec<&str> = body["distribution"]["slices"]
      .as_array()
      .unwrap()
      .iter()
      .map(|s| s["label"].as_str().unwrap())
      .collect();
    assert_eq!(labels, vec!["HPAI-P", "ND"]);
  }

  // ── Neighbours ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn neighbours_defaults_to_both_countries() {
    let (status, body) = get_json(make_state(), "/api/neighbours").await;
    assert_eq!(status, StatusCode::OK);
    let categories: Vec<&str> = body["category_by_country"]["categories"]
      .as_array()
      .unwrap()
      .iter()
      .map(|c| c.as_str().unwrap())
      .collect();
    // The 2023 Thailand row is removed by the cleaning step.
    assert_eq!(categories, vec!["Thailand", "Vietnam"]);
  }

  #[tokio::test]
  async fn neighbours_country_filter_applies() {
    let (status, body) =
      get_json(make_state(), "/api/neighbours?countries=Vietnam").await;
    assert_eq!(status, StatusCode::OK);
    let categories = body["category_by_country"]["categories"]
      .as_array()
      .unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0], "Vietnam");
  }

  // ── Weather ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn weather_tab_emits_alerts_for_fixture() {
    let (status, body) = get_json(make_state(), "/api/weather").await;
    assert_eq!(status, StatusCode::OK);
    let kinds: Vec<&str> = body["alerts"]
      .as_array()
      .unwrap()
      .iter()
      .map(|a| a["kind"].as_str().unwrap())
      .collect();
    // Fixture reading: 36.5°C and 95% humidity.
    assert_eq!(kinds, vec!["high_temperature", "high_humidity"]);
  }

  // ── News ──────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn news_without_query_returns_all_articles() {
    let (status, body) = get_json(make_state(), "/api/news").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["articles"].as_array().unwrap().len(), 2);
    assert_eq!(body["metrics"]["press_releases"], 1);
    assert!(body.get("message").is_none());
  }

  #[tokio::test]
  async fn news_no_match_returns_sentinel_message() {
    let (status, body) =
      get_json(make_state(), "/api/news?search=zzz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["articles"].as_array().unwrap().len(), 0);
    assert_eq!(body["message"], "No articles found.");
  }

  #[tokio::test]
  async fn news_search_matches_body_text() {
    let (status, body) =
      get_json(make_state(), "/api/news?search=roundup").await;
    assert_eq!(status, StatusCode::OK);
    let articles = body["articles"].as_array().unwrap();
    assert_eq!(articles.len(), 1);
    assert_eq!(articles[0]["title"], "Weekly digest");
  }

  // ── Refresh ───────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn refresh_swaps_in_a_new_snapshot() {
    let state = make_state();
    let before = state.snapshot().await.fetched_at;

    let response = router(state.clone())
      .oneshot(
        Request::builder()
          .method("POST")
          .uri("/api/refresh")
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let after = state.snapshot().await.fetched_at;
    assert!(after >= before);
  }

  #[tokio::test]
  async fn refresh_reapplies_the_geocode_backfill() {
    // Stand-in geocoding endpoint answering every query with one place.
    let listener =
      tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint =
      format!("http://{}/search", listener.local_addr().unwrap());
    let geocoding = Router::new().route(
      "/search",
      get(|| async {
        axum::Json(serde_json::json!([{ "lat": "19.45", "lon": "103.19" }]))
      }),
    );
    tokio::spawn(async move {
      axum::serve(listener, geocoding).await.unwrap();
    });

    // One report location without a matching capital in the region sheet.
    let source = fixture_source().with_sheet(
      "laos_data",
      &["reported_date", "province", "location", "disease_code", "case"],
      &[
        &["2024-03-02", "Vientiane Province", "Vientiane", "HPAI-P", "4"],
        &["2024-04-15", "Xiangkhouang", "Phonsavan", "ND", "9"],
      ],
    );
    let mut config = test_config();
    config.geocode_missing = true;
    config.geocode_url = Some(endpoint);

    let snapshot = load_snapshot(&source).unwrap();
    let state = AppState::new(source, snapshot, None, config);

    let find = |snapshot: &Snapshot| {
      snapshot
        .reports
        .iter()
        .find(|r| r.location == "Phonsavan")
        .cloned()
        .unwrap()
    };
    assert!(find(&*state.snapshot().await).latitude.is_none());

    let response = router(state.clone())
      .oneshot(
        Request::builder()
          .method("POST")
          .uri("/api/refresh")
          .body(Body::empty())
          .unwrap(),
      )
      .await
      .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let row = find(&*state.snapshot().await);
    assert_eq!(row.latitude, Some(19.45));
    assert_eq!(row.longitude, Some(103.19));
  }
}
