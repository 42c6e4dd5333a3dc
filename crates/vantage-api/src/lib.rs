//! JSON REST API for Vantage.
//!
//! Exposes an axum [`Router`] backed by any [`vantage_core::store::RecordStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", vantage_api::api_router(state))
//! ```

pub mod competitors;
pub mod error;
pub mod research;
pub mod social;

use std::sync::Arc;

use axum::{Router, routing::get};
use serde_json::Value;
use vantage_core::store::RecordStore;

pub use error::ApiError;

/// Shared state threaded through all handlers.
pub struct ApiState<S> {
  pub store:           Arc<S>,
  /// Origin the dashboard is served from; prefix of every `viewUrl`.
  pub public_base_url: Arc<str>,
}

impl<S> ApiState<S> {
  pub fn new(store: Arc<S>, public_base_url: impl Into<Arc<str>>) -> Self {
    Self {
      store,
      public_base_url: public_base_url.into(),
    }
  }
}

// Manual impl: `S` itself need not be `Clone`.
impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self {
      store:           Arc::clone(&self.store),
      public_base_url: Arc::clone(&self.public_base_url),
    }
  }
}

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(state: ApiState<S>) -> Router<()>
where
  S: RecordStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  // Called cross-origin by the content-generation workflow.
  let social = Router::new()
    .route("/social-content", get(social::list::<S>).post(social::create::<S>))
    .layer(social::cors_layer());

  Router::new()
    // Competitors
    .route(
      "/competitors",
      get(competitors::list::<S>).post(competitors::create::<S>),
    )
    // Research results
    .route(
      "/research-results",
      get(research::list::<S>).post(research::create::<S>),
    )
    // Social content
    .route("/social-content/{id}", get(social::get_one::<S>))
    .merge(social)
    .with_state(state)
}

/// Parse a request body as JSON, rejecting anything that is not.
pub(crate) fn parse_json_body(body: &[u8]) -> Result<Value, ApiError> {
  serde_json::from_slice(body)
    .map_err(|_| ApiError::BadRequest("Request body must be valid JSON".to_owned()))
}

// ─── Integration tests ────────────────────────────────────────────────────────
