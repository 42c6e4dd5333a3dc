//! Social content: generated marketing copy attached to an analysis.
//!
//! Records are pushed in by an external automation service once it has
//! finished generating content, then polled by `analysisId`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored piece of generated content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialContent {
  pub id:          String,
  /// Soft reference to an analysis that lives outside this system; never
  /// validated.
  #[serde(rename = "analysisId")]
  pub analysis_id: String,
  /// Verbatim payload: a plain string or any JSON structure.
  pub content:     Value,
  #[serde(default)]
  pub source:      Option<String>,
  pub created_at:  DateTime<Utc>,
}

/// Input to [`RecordStore::create_social_content`](crate::store::RecordStore::create_social_content).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewSocialContent {
  #[serde(rename = "analysisId")]
  pub analysis_id: String,
  pub content:     Value,
  pub source:      Option<String>,
}

impl NewSocialContent {
  pub fn new(analysis_id: impl Into<String>, content: impl Into<Value>) -> Self {
    Self {
      analysis_id: analysis_id.into(),
      content:     content.into(),
      source:      None,
    }
  }

  pub fn into_social_content(self, id: String, now: DateTime<Utc>) -> SocialContent {
    SocialContent {
      id,
      analysis_id: self.analysis_id,
      content: self.content,
      source: self.source,
      created_at: now,
    }
  }
}
