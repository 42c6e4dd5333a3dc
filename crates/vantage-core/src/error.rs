//! Error types for `vantage-core`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("cannot prepare storage directory {}: {source}", path.display())]
  StorageDir {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// The collection already holds the largest representable id.
  #[error("no id left after {max}")]
  IdExhausted { max: i64 },

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
