//! vantage-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`) plus `VANTAGE_*`
//! environment overrides, opens the configured record store and serves the
//! JSON API under `/api`.

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use vantage_api::ApiState;
use vantage_core::location::StorageLocation;
use vantage_server::{Backend, ServerConfig};
use vantage_store_json::JsonStore;
use vantage_store_sqlite::{DB_FILE, SqliteStore};

#[derive(Parser)]
#[command(author, version, about = "Vantage competitor-intelligence API server")]
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
  let cfg = ServerConfig::load(&cli.config)?;

  let app = match cfg.backend {
    Backend::Json => {
      // Directories are resolved on first use of each collection.
      let store = JsonStore::new(&cfg.data_dir, &cfg.fallback_dir);
      vantage_server::app(ApiState::new(Arc::new(store), cfg.public_base_url.as_str()))
    }
    Backend::Sqlite => {
      let location = StorageLocation::new(&cfg.data_dir, &cfg.fallback_dir, DB_FILE);
      let store = SqliteStore::open_at(&location)
        .await
        .context("failed to open sqlite store")?;
      vantage_server::app(ApiState::new(Arc::new(store), cfg.public_base_url.as_str()))
    }
  };

  let address = cfg.address();
  tracing::info!(backend = ?cfg.backend, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
