//! whereabouts API server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! SQLite store, hydrates the calendar from it, and serves JSON over HTTP.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use whereabouts_api::{AppState, ServerConfig};
use whereabouts_core::calendar::GroupCalendar;
use whereabouts_store_sqlite::SqliteStore;

#[derive(Parser)]
#[command(author, version, about = "whereabouts API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("WHEREABOUTS"))
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store = SqliteStore::open(&server_cfg.store_path).with_context(|| {
    format!("failed to open store at {:?}", server_cfg.store_path)
  })?;

  let calendar = GroupCalendar::hydrated(store)
    .context("failed to hydrate calendar from store")?;

  let state = AppState { calendar: Arc::new(Mutex::new(calendar)) };
  let app = whereabouts_api::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
