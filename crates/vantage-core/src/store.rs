//! The `RecordStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (`vantage-store-json`,
//! `vantage-store-sqlite`). The HTTP layer depends on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use serde_json::Value;

use crate::{
  competitor::{Competitor, NewCompetitor},
  page::{ListQuery, Page},
  research::ResearchResult,
  social::{NewSocialContent, SocialContent},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`RecordStore::list_competitors`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompetitorQuery {
  /// Exact-match status filter. `None` and `Some("")` both mean no filter.
  pub status: Option<String>,
  pub page:   ListQuery,
}

impl CompetitorQuery {
  /// The status to filter on, ignoring an empty string.
  pub fn status_filter(&self) -> Option<&str> {
    self.status.as_deref().filter(|s| !s.is_empty())
  }

  /// Filter and window an in-memory collection.
  ///
  /// `total` is the size of the collection *before* the status filter so the
  /// dashboard can show overall volume; it is not the filtered count.
  pub fn apply(&self, items: Vec<Competitor>) -> Page<Competitor> {
    let total = items.len();
    let items = match self.status_filter() {
      Some(status) => self
        .page
        .window(items.into_iter().filter(|c| c.status == status)),
      None => self.page.window(items),
    };
    Page { items, total }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over the three Vantage record collections.
///
/// All collections are append-only: records are created once and never
/// updated or deleted. List operations return records in insertion order.
/// A missing or unreadable collection reads as empty.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Competitors ───────────────────────────────────────────────────────

  /// List competitors, optionally filtered by status. See
  /// [`CompetitorQuery::apply`] for the meaning of `total`.
  fn list_competitors<'a>(
    &'a self,
    query: &'a CompetitorQuery,
  ) -> impl Future<Output = Result<Page<Competitor>, Self::Error>> + Send + 'a;

  /// Persist a new competitor with the next sequential id.
  fn create_competitor(
    &self,
    input: NewCompetitor,
  ) -> impl Future<Output = Result<Competitor, Self::Error>> + Send + '_;

  // ── Research results ──────────────────────────────────────────────────

  fn list_research_results(
    &self,
    query: ListQuery,
  ) -> impl Future<Output = Result<Page<ResearchResult>, Self::Error>> + Send + '_;

  /// Store `data` verbatim under the next sequential id.
  fn create_research_result(
    &self,
    data: Value,
  ) -> impl Future<Output = Result<ResearchResult, Self::Error>> + Send + '_;

  // ── Social content ────────────────────────────────────────────────────

  /// Persist generated content under a fresh `sc-…` id.
  fn create_social_content(
    &self,
    input: NewSocialContent,
  ) -> impl Future<Output = Result<SocialContent, Self::Error>> + Send + '_;

  /// Retrieve one record by id. Returns `None` if not found.
  fn get_social_content<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<SocialContent>, Self::Error>> + Send + 'a;

  /// All records for `analysis_id`, in insertion order.
  fn list_social_content<'a>(
    &'a self,
    analysis_id: &'a str,
  ) -> impl Future<Output = Result<Vec<SocialContent>, Self::Error>> + Send + 'a;
}
