//! Research results: raw third-party research payloads kept verbatim.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A stored research payload. `data` is never inspected or normalised.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchResult {
  pub id:         i64,
  pub created_at: DateTime<Utc>,
  pub data:       Value,
}

impl ResearchResult {
  pub fn new(id: i64, data: Value, now: DateTime<Utc>) -> Self {
    Self {
      id,
      created_at: now,
      data,
    }
  }
}
