//! laostat server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), loads the
//! exported spreadsheet CSVs from `data_dir`, and serves the dashboard JSON
//! API over HTTP. A background task re-reads the sheets on a fixed interval.

use std::{path::PathBuf, time::Duration};

use anyhow::Context as _;
use clap::Parser;
use laostat_api::{AppState, ServerConfig};
use laostat_ingest::CsvSheetSource;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Laos outbreak dashboard API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("LAOSTAT"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let source = CsvSheetSource::open(&server_cfg.data_dir);

  // The initial load is fatal. CSV reads and the geocoder are blocking, so
  // they run off the async runtime. Refresh goes through the same path.
  let cfg = server_cfg.clone();
  let (source, snapshot) = tokio::task::spawn_blocking(move || {
    let snapshot = laostat_api::fetch_snapshot(&source, &cfg)?;
    Ok::<_, laostat_ingest::Error>((source, snapshot))
  })
  .await
  .context("initial load task failed")?
  .context("failed to load initial snapshot")?;

  // Province boundary polygon, if configured.
  let boundary = match &server_cfg.geojson_path {
    Some(path) => {
      let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read geojson at {path:?}"))?;
      Some(
        serde_json::from_str(&raw)
          .with_context(|| format!("invalid geojson at {path:?}"))?,
      )
    }
    None => None,
  };

  let state = AppState::new(source, snapshot, boundary, server_cfg.clone());

  // Periodic refresh, same path as POST /api/refresh.
  if server_cfg.refresh_interval_secs > 0 {
    let refresh_state = state.clone();
    let period = Duration::from_secs(server_cfg.refresh_interval_secs);
    tokio::spawn(async move {
      let mut interval = tokio::time::interval(period);
      // The first tick fires immediately; the snapshot is already fresh.
      interval.tick().await;
      loop {
        interval.tick().await;
        if let Err(error) =
          laostat_api::handlers::refresh::reload(&refresh_state).await
        {
          tracing::warn!(%error, "scheduled refresh failed");
        }
      }
    });
  }

  let app = laostat_api::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
