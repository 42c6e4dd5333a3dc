//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Verbatim payloads are stored
//! as compact JSON with their key order intact.

use chrono::{DateTime, Utc};
use serde_json::Value;
use vantage_core::{
  competitor::Competitor, research::ResearchResult, social::SocialContent,
};

use crate::{Error, Result};

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Payloads ────────────────────────────────────────────────────────────────

pub fn encode_json(value: &Value) -> Result<String> {
  Ok(serde_json::to_string(value)?)
}

pub fn decode_json(s: &str) -> Result<Value> { Ok(serde_json::from_str(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawCompetitor::from_row`].
pub const COMPETITOR_COLUMNS: &str = "id, name, website_url, twitter_url, \
  instagram_url, facebook_url, reddit_url, discord_url, industry, \
  description, logo_url, status, created_at, updated_at";

/// Raw values read directly from a `competitors` row.
pub struct RawCompetitor {
  pub id:            i64,
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
  pub status:        String,
  pub created_at:    String,
  pub updated_at:    String,
}

impl RawCompetitor {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:            row.get(0)?,
      name:          row.get(1)?,
      website_url:   row.get(2)?,
      twitter_url:   row.get(3)?,
      instagram_url: row.get(4)?,
      facebook_url:  row.get(5)?,
      reddit_url:    row.get(6)?,
      discord_url:   row.get(7)?,
      industry:      row.get(8)?,
      description:   row.get(9)?,
      logo_url:      row.get(10)?,
      status:        row.get(11)?,
      created_at:    row.get(12)?,
      updated_at:    row.get(13)?,
    })
  }

  pub fn into_competitor(self) -> Result<Competitor> {
    Ok(Competitor {
      id:            self.id,
      name:          self.name,
      website_url:   self.website_url,
      twitter_url:   self.twitter_url,
      instagram_url: self.instagram_url,
      facebook_url:  self.facebook_url,
      reddit_url:    self.reddit_url,
      discord_url:   self.discord_url,
      industry:      self.industry,
      description:   self.description,
      logo_url:      self.logo_url,
      status:        self.status,
      created_at:    decode_dt(&self.created_at)?,
      updated_at:    decode_dt(&self.updated_at)?,
    })
  }
}

/// Raw values read directly from a `research_results` row.
pub struct RawResearchResult {
  pub id:         i64,
  pub created_at: String,
  pub data_json:  String,
}

impl RawResearchResult {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:         row.get(0)?,
      created_at: row.get(1)?,
      data_json:  row.get(2)?,
    })
  }

  pub fn into_result(self) -> Result<ResearchResult> {
    Ok(ResearchResult {
      id:         self.id,
      created_at: decode_dt(&self.created_at)?,
      data:       decode_json(&self.data_json)?,
    })
  }
}

/// Raw values read directly from a `social_content` row.
pub struct RawSocialContent {
  pub id:           String,
  pub analysis_id:  String,
  pub content_json: String,
  pub source:       Option<String>,
  pub created_at:   String,
}

impl RawSocialContent {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      analysis_id:  row.get(1)?,
      content_json: row.get(2)?,
      source:       row.get(3)?,
      created_at:   row.get(4)?,
    })
  }

  pub fn into_social_content(self) -> Result<SocialContent> {
    Ok(SocialContent {
      id:          self.id,
      analysis_id: self.analysis_id,
      content:     decode_json(&self.content_json)?,
      source:      self.source,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}
