//! Handlers for `/competitors` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/competitors` | Optional `skip`, `limit`, `status` |
//! | `POST` | `/competitors` | Body: [`CreateBody`]; `name` required; returns 201 + record |

use axum::{
  Json,
  extract::{Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;
use vantage_core::{
  competitor::{Competitor, NewCompetitor},
  page::{ListQuery, Page},
  store::{CompetitorQuery, RecordStore},
};

use crate::{ApiState, error::ApiError, parse_json_body};

// ─── List ─────────────────────────────────────────────────────────────────────

/// Raw query values; coerced by [`ListQuery::from_raw`] so a malformed number
/// falls back to its default instead of failing the request.
#[derive(Debug, Deserialize)]
pub struct ListParams {
  pub skip:   Option<String>,
  pub limit:  Option<String>,
  pub status: Option<String>,
}

/// `GET /competitors[?skip=..][&limit=..][&status=..]`
///
/// `total` counts every competitor, including those the status filter hides.
pub async fn list<S>(
  State(state): State<ApiState<S>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Page<Competitor>>, ApiError>
where
  S: RecordStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let query = CompetitorQuery {
    status: params.status,
    page:   ListQuery::from_raw(params.skip.as_deref(), params.limit.as_deref()),
  };

  let page = state
    .store
    .list_competitors(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(page))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /competitors`.
#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name:          String,
  pub website_url:   Option<String>,
  pub twitter_url:   Option<String>,
  pub instagram_url: Option<String>,
  pub facebook_url:  Option<String>,
  pub reddit_url:    Option<String>,
  pub discord_url:   Option<String>,
  pub industry:      Option<String>,
  pub description:   Option<String>,
  pub logo_url:      Option<String>,
  pub status:        Option<String>,
}

impl From<CreateBody> for NewCompetitor {
  fn from(b: CreateBody) -> Self {
    NewCompetitor {
      name:          b.name,
      website_url:   b.website_url,
      twitter_url:   b.twitter_url,
      instagram_url: b.instagram_url,
      facebook_url:  b.facebook_url,
      reddit_url:    b.reddit_url,
      discord_url:   b.discord_url,
      industry:      b.industry,
      description:   b.description,
      logo_url:      b.logo_url,
      status:        b.status,
    }
  }
}

/// `POST /competitors`: returns 201 + the stored [`Competitor`].
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  body: Bytes,
) -> Result<impl IntoResponse, ApiError>
where
  S: RecordStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let value = parse_json_body(&body)?;

  let has_name = value
    .get("name")
    .and_then(Value::as_str)
    .is_some_and(|name| !name.is_empty());
  if !has_name {
    return Err(ApiError::BadRequest(
      "name is required and must be a string".to_owned(),
    ));
  }

  let body: CreateBody = serde_json::from_value(value)
    .map_err(|e| ApiError::BadRequest(format!("invalid competitor: {e}")))?;

  let competitor = state
    .store
    .create_competitor(NewCompetitor::from(body))
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok((StatusCode::CREATED, Json(competitor)))
}
