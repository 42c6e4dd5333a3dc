//! Competitor records: the companies a user benchmarks against.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status assigned when a new competitor does not specify one.
pub const DEFAULT_STATUS: &str = "active";

fn default_status() -> String { DEFAULT_STATUS.to_owned() }

/// A persisted competitor.
///
/// Every optional profile field is always present in the serialised form
/// (as `null` when unset) so stored records share one shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Competitor {
  pub id:            i64,
  pub name:          String,
  #[serde(default)]
  pub website_url:   Option<String>,
  #[serde(default)]
  pub twitter_url:   Option<String>,
  #[serde(default)]
  pub instagram_url: Option<String>,
  #[serde(default)]
  pub facebook_url:  Option<String>,
  #[serde(default)]
  pub reddit_url:    Option<String>,
  #[serde(default)]
  pub discord_url:   Option<String>,
  #[serde(default)]
  pub industry:      Option<String>,
  #[serde(default)]
  pub description:   Option<String>,
  #[serde(default)]
  pub logo_url:      Option<String>,
  #[serde(default = "default_status")]
  pub status:        String,
  pub created_at:    DateTime<Utc>,
  /// Equal to `created_at`; competitors are never updated.
  pub updated_at:    DateTime<Utc>,
}

/// Input to [`RecordStore::create_competitor`](crate::store::RecordStore::create_competitor).
///
/// `name` is trusted to be non-empty; the HTTP boundary rejects bodies
/// without one before a store ever sees them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCompetitor {
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
  /// Defaults to [`DEFAULT_STATUS`].
  pub status:        Option<String>,
}

impl NewCompetitor {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      ..Self::default()
    }
  }

  /// Build the stored record once the store has picked an id.
  pub fn into_competitor(self, id: i64, now: DateTime<Utc>) -> Competitor {
    Competitor {
      id,
      name: self.name,
      website_url: self.website_url,
      twitter_url: self.twitter_url,
      instagram_url: self.instagram_url,
      facebook_url: self.facebook_url,
      reddit_url: self.reddit_url,
      discord_url: self.discord_url,
      industry: self.industry,
      description: self.description,
      logo_url: self.logo_url,
      status: self.status.unwrap_or_else(default_status),
      created_at: now,
      updated_at: now,
    }
  }
}
