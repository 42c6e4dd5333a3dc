//! JSON-file backend for the Vantage record stores.
//!
//! Each collection is one pretty-printed JSON array on disk. Writes rewrite
//! the whole array under a per-collection lock and land via rename, so
//! concurrent creates never lose records and readers never see a torn file.

mod collection;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{COMPETITORS_FILE, JsonStore, RESEARCH_RESULTS_FILE, SOCIAL_CONTENT_FILE};

#[cfg(test)]
mod tests;
