//! Process-level wiring for the Vantage server: configuration and the
//! top-level router. The binary in `main.rs` only parses flags, installs
//! tracing and picks a backend.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use axum::{Json, Router, routing::get};
use serde::Deserialize;
use serde_json::{Value, json};
use tower_http::trace::TraceLayer;
use vantage_api::{ApiState, api_router};
use vantage_core::{location::default_fallback_dir, store::RecordStore};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which [`RecordStore`] implementation backs the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  /// One pretty-printed JSON file per collection.
  #[default]
  Json,
  /// All collections in a single SQLite database.
  Sqlite,
}

/// Runtime server configuration, deserialised from `config.toml` and
/// `VANTAGE_*` environment variables. Every field has a default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
  pub host:            String,
  pub port:            u16,
  /// Origin of the dashboard; prefix of every social-content `viewUrl`.
  pub public_base_url: String,
  pub backend:         Backend,
  pub data_dir:        PathBuf,
  /// Used when `data_dir` cannot be created or written.
  pub fallback_dir:    PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:            "127.0.0.1".to_owned(),
      port:            3000,
      public_base_url: "http://localhost:3000".to_owned(),
      backend:         Backend::default(),
      data_dir:        PathBuf::from(".data"),
      fallback_dir:    default_fallback_dir(),
    }
  }
}

impl ServerConfig {
  /// Layer `VANTAGE_*` environment variables over the TOML file at `path`.
  /// A missing file is not an error.
  pub fn load(path: &Path) -> anyhow::Result<Self> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("VANTAGE").try_parsing(true))
      .build()
      .context("failed to read config file")?
      .try_deserialize()
      .context("failed to deserialise ServerConfig")
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// The complete application: the API under `/api` plus `/health`.
pub fn app<S>(state: ApiState<S>) -> Router
where
  S: RecordStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/health", get(health))
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}

async fn health() -> Json<Value> { Json(json!({ "status": "ok" })) }
