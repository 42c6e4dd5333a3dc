//! Storage location resolution.
//!
//! A [`StorageLocation`] names one backing file and two candidate directories.
//! The first access picks a directory: the primary if it can be created and
//! written, otherwise the fallback under the OS temp area. The choice is kept
//! for the life of the instance.

use std::path::{Path, PathBuf};

use tokio::sync::OnceCell;

use crate::{Error, Result};

/// Directory name used under [`std::env::temp_dir`] when the primary data
/// directory is not writable (read-only deployment filesystems).
pub const FALLBACK_DIR_NAME: &str = "research-app-data";

/// `<tmp>/research-app-data`, shared by every collection.
pub fn default_fallback_dir() -> PathBuf {
  std::env::temp_dir().join(FALLBACK_DIR_NAME)
}

#[derive(Debug)]
pub struct StorageLocation {
  primary:   PathBuf,
  fallback:  PathBuf,
  file_name: String,
  resolved:  OnceCell<PathBuf>,
}

impl StorageLocation {
  pub fn new(
    primary: impl Into<PathBuf>,
    fallback: impl Into<PathBuf>,
    file_name: impl Into<String>,
  ) -> Self {
    Self {
      primary:   primary.into(),
      fallback:  fallback.into(),
      file_name: file_name.into(),
      resolved:  OnceCell::new(),
    }
  }

  /// Primary directory with the default temp-area fallback.
  pub fn with_default_fallback(
    primary: impl Into<PathBuf>,
    file_name: impl Into<String>,
  ) -> Self {
    Self::new(primary, default_fallback_dir(), file_name)
  }

  pub fn file_name(&self) -> &str { &self.file_name }

  /// The chosen directory, if resolution has already happened.
  pub fn resolved_dir(&self) -> Option<&Path> {
    self.resolved.get().map(PathBuf::as_path)
  }

  /// Resolve (once) and return the writable directory.
  ///
  /// Fails only when the fallback cannot be prepared either. A failed
  /// attempt is not cached, so the next call tries again.
  pub async fn dir(&self) -> Result<&Path> {
    let dir = self.resolved.get_or_try_init(|| self.choose()).await?;
    Ok(dir.as_path())
  }

  async fn choose(&self) -> Result<PathBuf> {
    match prepare(&self.primary, &self.file_name).await {
      Ok(()) => {
        tracing::info!(
          dir = %self.primary.display(),
          file = %self.file_name,
          "using data directory",
        );
        Ok(self.primary.clone())
      }
      Err(err) => {
        tracing::warn!(
          primary = %self.primary.display(),
          fallback = %self.fallback.display(),
          file = %self.file_name,
          error = %err,
          "primary data directory not writable, falling back",
        );
        prepare(&self.fallback, &self.file_name)
          .await
          .map_err(|source| Error::StorageDir {
            path: self.fallback.clone(),
            source,
          })?;
        Ok(self.fallback.clone())
      }
    }
  }

  /// Full path of the backing file inside the resolved directory.
  pub async fn file_path(&self) -> Result<PathBuf> {
    Ok(self.dir().await?.join(&self.file_name))
  }
}

/// Create `dir` and prove it accepts writes.
async fn prepare(dir: &Path, file_name: &str) -> std::io::Result<()> {
  tokio::fs::create_dir_all(dir).await?;
  let probe = dir.join(format!(".{file_name}.probe-{}", std::process::id()));
  tokio::fs::write(&probe, b"").await?;
  // Another store sharing the directory may race us to the same probe.
  let _ = tokio::fs::remove_file(&probe).await;
  Ok(())
}
