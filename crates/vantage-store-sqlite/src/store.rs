//! [`SqliteStore`]: the SQLite implementation of [`RecordStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use serde_json::Value;
use vantage_core::{
  competitor::{Competitor, NewCompetitor},
  id::{next_sequential_id, social_content_id},
  location::StorageLocation,
  page::{ListQuery, Page},
  research::ResearchResult,
  social::{NewSocialContent, SocialContent},
  store::{CompetitorQuery, RecordStore},
};

use crate::{
  Result,
  encode::{
    COMPETITOR_COLUMNS, RawCompetitor, RawResearchResult, RawSocialContent, encode_dt,
    encode_json,
  },
  schema::SCHEMA,
};

/// Database file name inside a resolved [`StorageLocation`] directory.
pub const DB_FILE: &str = "vantage.db";

// ─── Store ───────────────────────────────────────────────────────────────────

/// All three collections in a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  pub(crate) conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Resolve `location` (falling back if needed) and open the database file
  /// it names.
  pub async fn open_at(location: &StorageLocation) -> Result<Self> {
    let path = location.file_path().await?;
    tracing::info!(path = %path.display(), "opening sqlite store");
    Self::open(path).await
  }

  /// Open an in-memory store. Used by tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

fn window_params(page: ListQuery) -> (i64, i64) {
  (page.limit as i64, page.skip as i64)
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = crate::Error;

  // ── Competitors ───────────────────────────────────────────────────────────

  async fn list_competitors(&self, query: &CompetitorQuery) -> Result<Page<Competitor>> {
    let status = query.status_filter().map(str::to_owned);
    let (limit, offset) = window_params(query.page);

    let (total, raws): (i64, Vec<RawCompetitor>) = self
      .conn
      .call(move |conn| {
        // `total` deliberately ignores the status filter.
        let total: i64 =
          conn.query_row("SELECT COUNT(*) FROM competitors", [], |r| r.get(0))?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {COMPETITOR_COLUMNS} FROM competitors
           WHERE ?1 IS NULL OR status = ?1
           ORDER BY id
           LIMIT ?2 OFFSET ?3"
        ))?;
        let rows = stmt
          .query_map(
            rusqlite::params![status, limit, offset],
            RawCompetitor::from_row,
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((total, rows))
      })
      .await?;

    Ok(Page {
      items: raws
        .into_iter()
        .map(RawCompetitor::into_competitor)
        .collect::<Result<_>>()?,
      total: total as usize,
    })
  }

  async fn create_competitor(&self, input: NewCompetitor) -> Result<Competitor> {
    let now = Utc::now();
    let at_str = encode_dt(now);

    let competitor = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let max: Option<i64> = tx.query_row("SELECT MAX(id) FROM competitors", [], |r| r.get(0))?;
        let id = match next_sequential_id(max) {
          Ok(id) => id,
          Err(e) => return Ok(Err(e)),
        };
        let c = input.into_competitor(id, now);
        tx.execute(
          "INSERT INTO competitors (
             id, name, website_url, twitter_url, instagram_url, facebook_url,
             reddit_url, discord_url, industry, description, logo_url,
             status, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?13)",
          rusqlite::params![
            c.id,
            c.name,
            c.website_url,
            c.twitter_url,
            c.instagram_url,
            c.facebook_url,
            c.reddit_url,
            c.discord_url,
            c.industry,
            c.description,
            c.logo_url,
            c.status,
            at_str,
          ],
        )?;
        tx.commit()?;
        Ok(Ok(c))
      })
      .await??;

    tracing::debug!(id = competitor.id, name = %competitor.name, "created competitor");
    Ok(competitor)
  }

  // ── Research results ──────────────────────────────────────────────────────

  async fn list_research_results(&self, query: ListQuery) -> Result<Page<ResearchResult>> {
    let (limit, offset) = window_params(query);

    let (total, raws): (i64, Vec<RawResearchResult>) = self
      .conn
      .call(move |conn| {
        let total: i64 =
          conn.query_row("SELECT COUNT(*) FROM research_results", [], |r| r.get(0))?;
        let mut stmt = conn.prepare(
          "SELECT id, created_at, data_json FROM research_results
           ORDER BY id
           LIMIT ?1 OFFSET ?2",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![limit, offset], RawResearchResult::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok((total, rows))
      })
      .await?;

    Ok(Page {
      items: raws
        .into_iter()
        .map(RawResearchResult::into_result)
        .collect::<Result<_>>()?,
      total: total as usize,
    })
  }

  async fn create_research_result(&self, data: Value) -> Result<ResearchResult> {
    let now = Utc::now();
    let at_str = encode_dt(now);
    let data_str = encode_json(&data)?;

    let id: i64 = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let max: Option<i64> =
          tx.query_row("SELECT MAX(id) FROM research_results", [], |r| r.get(0))?;
        let id = match next_sequential_id(max) {
          Ok(id) => id,
          Err(e) => return Ok(Err(e)),
        };
        tx.execute(
          "INSERT INTO research_results (id, created_at, data_json) VALUES (?1, ?2, ?3)",
          rusqlite::params![id, at_str, data_str],
        )?;
        tx.commit()?;
        Ok(Ok(id))
      })
      .await??;

    tracing::debug!(id, "stored research result");
    Ok(ResearchResult::new(id, data, now))
  }

  // ── Social content ────────────────────────────────────────────────────────

  async fn create_social_content(&self, input: NewSocialContent) -> Result<SocialContent> {
    let now = Utc::now();
    let record = input.into_social_content(social_content_id(now), now);

    let id_str = record.id.clone();
    let analysis_id = record.analysis_id.clone();
    let content_str = encode_json(&record.content)?;
    let source = record.source.clone();
    let at_str = encode_dt(now);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO social_content (id, analysis_id, content_json, source, created_at)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![id_str, analysis_id, content_str, source, at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(id = %record.id, analysis_id = %record.analysis_id, "stored social content");
    Ok(record)
  }

  async fn get_social_content(&self, id: &str) -> Result<Option<SocialContent>> {
    let id_str = id.to_owned();

    let raw: Option<RawSocialContent> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, analysis_id, content_json, source, created_at
             FROM social_content WHERE id = ?1",
            rusqlite::params![id_str],
            RawSocialContent::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSocialContent::into_social_content).transpose()
  }

  async fn list_social_content(&self, analysis_id: &str) -> Result<Vec<SocialContent>> {
    let analysis_id = analysis_id.to_owned();

    let raws: Vec<RawSocialContent> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, analysis_id, content_json, source, created_at
           FROM social_content
           WHERE analysis_id = ?1
           ORDER BY seq",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![analysis_id], RawSocialContent::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws
      .into_iter()
      .map(RawSocialContent::into_social_content)
      .collect()
  }
}
