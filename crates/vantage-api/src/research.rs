//! Handlers for `/research-results`. Bodies are stored verbatim.

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use bytes::Bytes;
use serde::Deserialize;
use vantage_core::{
  page::{ListQuery, Page},
  research::ResearchResult,
  store::RecordStore,
};

use crate::{ApiState, error::ApiError, parse_json_body};

#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub skip:  Option<String>,
  pub limit: Option<String>,
}

/// `GET /research-results[?skip=..][&limit=..]`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Page<ResearchResult>>, ApiError>
where
  S: RecordStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = ListQuery::from_raw(params.skip.as_deref(), params.limit.as_deref());
  let page = state
    .store
    .list_research_results(query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(page))
}

/// `POST /research-results` accepts any JSON value and returns 201 + the stored record.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let data = parse_json_body(&body)?;
  let result = state
    .store
    .create_research_result(data)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(result)))
}
