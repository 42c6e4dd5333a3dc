//! Identifier policies.
//!
//! Two strategies coexist on purpose:
//!
//! - competitors and research results get small dense integers computed from
//!   the current maximum, so a hand-edited backing file heals itself on the
//!   next insert;
//! - social content gets `sc-<unix millis>-<random base36>` ids that need no
//!   scan of the collection.

use chrono::{DateTime, Utc};
use rand_core::{OsRng, RngCore};

use crate::{Error, Result};

const SUFFIX_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 8;

/// `1` for an empty collection, otherwise one past the largest existing id.
///
/// Fails with [`Error::IdExhausted`] once the largest id is `i64::MAX`.
pub fn next_sequential_id(existing: impl IntoIterator<Item = i64>) -> Result<i64> {
  match existing.into_iter().max() {
    None => Ok(1),
    Some(max) => max.checked_add(1).ok_or(Error::IdExhausted { max }),
  }
}

/// Generate a social content id stamped with `now`.
pub fn social_content_id(now: DateTime<Utc>) -> String {
  let mut rng = OsRng;
  let suffix: String = (0..SUFFIX_LEN)
    .map(|_| {
      let idx = (rng.next_u32() % SUFFIX_ALPHABET.len() as u32) as usize;
      SUFFIX_ALPHABET[idx] as char
    })
    .collect();
  format!("sc-{}-{suffix}", now.timestamp_millis())
}

#[cfg(test)]
mod tests {
  use std::collections::HashSet;

  use chrono::TimeZone;

  use super::*;

  #[test]
  fn sequential_id_starts_at_one() {
    assert_eq!(next_sequential_id([]).unwrap(), 1);
  }

  #[test]
  fn sequential_id_follows_max_not_count() {
    // A gap left by a hand-edited file is not refilled.
    assert_eq!(next_sequential_id([1, 7, 3]).unwrap(), 8);
  }

  #[test]
  fn sequential_id_refuses_to_wrap() {
    let err = next_sequential_id([3, i64::MAX]).unwrap_err();
    assert!(matches!(err, Error::IdExhausted { max: i64::MAX }));
    assert_eq!(next_sequential_id([i64::MAX - 1]).unwrap(), i64::MAX);
  }

  #[test]
  fn social_content_id_shape() {
    let now = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    let id = social_content_id(now);

    let rest = id.strip_prefix("sc-1700000000123-").expect("prefix");
    assert_eq!(rest.len(), SUFFIX_LEN);
    assert!(rest.bytes().all(|b| SUFFIX_ALPHABET.contains(&b)));
  }

  #[test]
  fn social_content_ids_do_not_collide_within_one_millisecond() {
    let now = Utc::now();
    let ids: HashSet<String> = (0..1000).map(|_| social_content_id(now)).collect();
    assert_eq!(ids.len(), 1000);
  }
}
