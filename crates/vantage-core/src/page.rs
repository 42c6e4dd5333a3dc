//! Position-based pagination shared by every list operation.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LIMIT: usize = 100;
pub const MAX_LIMIT: usize = 1000;

/// A `skip`/`limit` window over a collection in insertion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
  pub skip:  usize,
  /// Always within `1..=MAX_LIMIT`.
  pub limit: usize,
}

impl Default for ListQuery {
  fn default() -> Self {
    Self {
      skip:  0,
      limit: DEFAULT_LIMIT,
    }
  }
}

impl ListQuery {
  pub fn new(skip: usize, limit: usize) -> Self {
    Self {
      skip,
      limit: limit.clamp(1, MAX_LIMIT),
    }
  }

  /// Coerce loosely-typed query-string values.
  ///
  /// Absent, non-numeric and zero values fall back to the defaults; `skip` is
  /// then floored at zero and `limit` clamped to `1..=MAX_LIMIT`. Fractions
  /// are truncated.
  pub fn from_raw(skip: Option<&str>, limit: Option<&str>) -> Self {
    let skip = parse_nonzero(skip).unwrap_or(0.0).max(0.0);
    let limit = parse_nonzero(limit)
      .unwrap_or(DEFAULT_LIMIT as f64)
      .clamp(1.0, MAX_LIMIT as f64);
    Self {
      skip:  skip.trunc() as usize,
      limit: limit.trunc() as usize,
    }
  }

  /// Apply the window to `items`.
  pub fn window<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
    items.into_iter().skip(self.skip).take(self.limit).collect()
  }

  /// Window `items` and report the size of the whole collection as `total`.
  pub fn page<T>(&self, items: Vec<T>) -> Page<T> {
    let total = items.len();
    Page {
      items: self.window(items),
      total,
    }
  }
}

fn parse_nonzero(raw: Option<&str>) -> Option<f64> {
  raw
    .and_then(|s| s.trim().parse::<f64>().ok())
    .filter(|n| n.is_finite() && *n != 0.0)
}

/// One window of a list operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
  pub items: Vec<T>,
  /// Size of the collection the window was cut from.
  pub total: usize,
}

impl<T> Page<T> {
  pub fn empty() -> Self {
    Self {
      items: Vec::new(),
      total: 0,
    }
  }
}
