//! Handlers for `/social-content` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/social-content?analysisId=<id>` | Polling; returns `{items}` |
//! | `GET`  | `/social-content/{id}` | 404 if not found |
//! | `POST` | `/social-content` | Body: `{analysisId, content, source?}`; returns 201 + `{id, viewUrl, createdAt}` |
//!
//! `POST` is called by the external content-generation workflow, so
//! `/social-content` carries a permissive CORS layer (see [`cors_layer`]).

use std::time::Duration;

use axum::{
  Json,
  extract::{Path, Query, State},
  http::{Method, StatusCode, header},
  response::IntoResponse,
};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::{Any, CorsLayer};
use vantage_core::{
  social::{NewSocialContent, SocialContent},
  store::RecordStore,
};

use crate::{ApiState, error::ApiError, parse_json_body};

/// Any origin may call `/social-content`; preflights are answered by the
/// layer itself and cached for a day.
pub fn cors_layer() -> CorsLayer {
  CorsLayer::new()
    .allow_origin(Any)
    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
    .max_age(Duration::from_secs(86_400))
}

// ─── List by analysis ─────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ListParams {
  #[serde(rename = "analysisId")]
  pub analysis_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
  pub items: Vec<SocialContent>,
}

/// `GET /social-content?analysisId=<id>`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError>
where
  S: RecordStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let analysis_id = params
    .analysis_id
    .filter(|id| !id.is_empty())
    .ok_or_else(|| ApiError::BadRequest("analysisId query is required".to_owned()))?;

  let items = state
    .store
    .list_social_content(&analysis_id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(ListResponse { items }))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /social-content/{id}`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<SocialContent>, ApiError>
where
  S: RecordStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let record = state
    .store
    .get_social_content(&id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound("Content not found".to_owned()))?;
  Ok(Json(record))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// Response to `POST /social-content`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Created {
  pub id:         String,
  /// Where the dashboard renders this piece of content.
  #[serde(rename = "viewUrl")]
  pub view_url:   String,
  #[serde(rename = "createdAt")]
  pub created_at: DateTime<Utc>,
}

/// Validate a raw body. `content` may be any JSON value including `null`, but
/// it must be present.
fn new_social_content(value: Value) -> Result<NewSocialContent, ApiError> {
  let Value::Object(mut body) = value else {
    return Err(ApiError::BadRequest("analysisId (string) is required".to_owned()));
  };

  let analysis_id = match body.remove("analysisId") {
    Some(Value::String(id)) if !id.is_empty() => id,
    _ => return Err(ApiError::BadRequest("analysisId (string) is required".to_owned())),
  };

  let content = body
    .remove("content")
    .ok_or_else(|| ApiError::BadRequest("content is required".to_owned()))?;

  let source = match body.remove("source") {
    None | Some(Value::Null) => None,
    Some(Value::String(s)) => Some(s),
    Some(_) => return Err(ApiError::BadRequest("source must be a string".to_owned())),
  };

  Ok(NewSocialContent {
    analysis_id,
    content,
    source,
  })
}

/// `POST /social-content`
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let input = new_social_content(parse_json_body(&body)?)?;

  let record = state
    .store
    .create_social_content(input)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  let view_url = format!(
    "{}/results/{}/content/view/{}",
    state.public_base_url.trim_end_matches('/'),
    record.analysis_id,
    record.id,
  );
  tracing::info!(id = %record.id, analysis_id = %record.analysis_id, "received social content");

  Ok((
    StatusCode::CREATED,
    Json(Created {
      id: record.id,
      view_url,
      created_at: record.created_at,
    }),
  ))
}
