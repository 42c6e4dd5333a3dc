//! [`JsonStore`]: the JSON-file implementation of [`RecordStore`].

use std::{path::Path, sync::Arc};

use chrono::Utc;
use serde_json::Value;
use vantage_core::{
  competitor::{Competitor, NewCompetitor},
  id::{next_sequential_id, social_content_id},
  location::{StorageLocation, default_fallback_dir},
  page::{ListQuery, Page},
  research::ResearchResult,
  social::{NewSocialContent, SocialContent},
  store::{CompetitorQuery, RecordStore},
};

use crate::{
  Error, Result,
  collection::{JsonCollection, element_ids},
};

pub const COMPETITORS_FILE: &str = "competitors.json";
pub const RESEARCH_RESULTS_FILE: &str = "research-results.json";
pub const SOCIAL_CONTENT_FILE: &str = "social-content.json";

// ─── Store ───────────────────────────────────────────────────────────────────

/// Three independent JSON collections, each with its own backing file,
/// resolved directory and write lock.
///
/// Cloning is cheap; the collections are reference-counted.
#[derive(Clone)]
pub struct JsonStore {
  inner: Arc<Collections>,
}

struct Collections {
  competitors: JsonCollection<Competitor>,
  research:    JsonCollection<ResearchResult>,
  social:      JsonCollection<SocialContent>,
}

impl JsonStore {
  /// A store whose files live in `data_dir`, falling back to `fallback_dir`
  /// when `data_dir` is not writable. Nothing touches the filesystem until
  /// the first operation on each collection.
  pub fn new(data_dir: impl AsRef<Path>, fallback_dir: impl AsRef<Path>) -> Self {
    let (primary, fallback) = (data_dir.as_ref(), fallback_dir.as_ref());
    Self::from_locations(
      StorageLocation::new(primary, fallback, COMPETITORS_FILE),
      StorageLocation::new(primary, fallback, RESEARCH_RESULTS_FILE),
      StorageLocation::new(primary, fallback, SOCIAL_CONTENT_FILE),
    )
  }

  /// Like [`JsonStore::new`] with the default temp-area fallback.
  pub fn open(data_dir: impl AsRef<Path>) -> Self {
    Self::new(data_dir, default_fallback_dir())
  }

  pub fn from_locations(
    competitors: StorageLocation,
    research: StorageLocation,
    social: StorageLocation,
  ) -> Self {
    Self {
      inner: Arc::new(Collections {
        competitors: JsonCollection::new(competitors),
        research:    JsonCollection::new(research),
        social:      JsonCollection::new(social),
      }),
    }
  }

  pub fn competitors_location(&self) -> &StorageLocation {
    self.inner.competitors.location()
  }

  pub fn research_location(&self) -> &StorageLocation {
    self.inner.research.location()
  }

  pub fn social_location(&self) -> &StorageLocation {
    self.inner.social.location()
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for JsonStore {
  type Error = Error;

  // ── Competitors ───────────────────────────────────────────────────────────

  async fn list_competitors(&self, query: &CompetitorQuery) -> Result<Page<Competitor>> {
    let items = self.inner.competitors.load().await?;
    Ok(query.apply(items))
  }

  async fn create_competitor(&self, input: NewCompetitor) -> Result<Competitor> {
    let competitor = self
      .inner
      .competitors
      .append(|elements| {
        let id = next_sequential_id(element_ids(elements))?;
        Ok(input.into_competitor(id, Utc::now()))
      })
      .await?;

    tracing::debug!(id = competitor.id, name = %competitor.name, "created competitor");
    Ok(competitor)
  }

  // ── Research results ──────────────────────────────────────────────────────

  async fn list_research_results(&self, query: ListQuery) -> Result<Page<ResearchResult>> {
    let items = self.inner.research.load().await?;
    Ok(query.page(items))
  }

  async fn create_research_result(&self, data: Value) -> Result<ResearchResult> {
    let result = self
      .inner
      .research
      .append(|elements| {
        let id = next_sequential_id(element_ids(elements))?;
        Ok(ResearchResult::new(id, data, Utc::now()))
      })
      .await?;

    tracing::debug!(id = result.id, "stored research result");
    Ok(result)
  }

  // ── Social content ────────────────────────────────────────────────────────

  async fn create_social_content(&self, input: NewSocialContent) -> Result<SocialContent> {
    let now = Utc::now();
    let id = social_content_id(now);

    let record = self
      .inner
      .social
      .append(|_| Ok(input.into_social_content(id, now)))
      .await?;

    tracing::debug!(id = %record.id, analysis_id = %record.analysis_id, "stored social content");
    Ok(record)
  }

  async fn get_social_content(&self, id: &str) -> Result<Option<SocialContent>> {
    let items = self.inner.social.load().await?;
    Ok(items.into_iter().find(|r| r.id == id))
  }

  async fn list_social_content(&self, analysis_id: &str) -> Result<Vec<SocialContent>> {
    let mut items = self.inner.social.load().await?;
    items.retain(|r| r.analysis_id == analysis_id);
    Ok(items)
  }
}
