//! [`JsonCollection`]: one record type persisted as a JSON array.

use std::{
  io::ErrorKind,
  marker::PhantomData,
  path::{Path, PathBuf},
  sync::atomic::{AtomicU64, Ordering},
};

use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tokio::{io::AsyncWriteExt as _, sync::Mutex};
use vantage_core::location::StorageLocation;

use crate::{Error, Result};

/// A whole-file JSON collection.
///
/// Reads take no lock: writes replace the file by rename, so a reader always
/// sees either the previous or the next complete array. Appends hold
/// `write_lock` across the full read-modify-write cycle, so a directory must
/// be owned by a single store instance.
///
/// Appends operate on the raw elements. Records that no longer decode as `T`
/// are hidden from [`load`](Self::load) but written back untouched, together
/// with any fields `T` does not know about.
pub(crate) struct JsonCollection<T> {
  location:   StorageLocation,
  write_lock: Mutex<()>,
  _record:    PhantomData<fn() -> T>,
}

impl<T> JsonCollection<T>
where
  T: Serialize + DeserializeOwned + Send,
{
  pub fn new(location: StorageLocation) -> Self {
    Self {
      location,
      write_lock: Mutex::new(()),
      _record: PhantomData,
    }
  }

  pub fn location(&self) -> &StorageLocation { &self.location }

  /// Every decodable record, in insertion order.
  pub async fn load(&self) -> Result<Vec<T>> {
    let path = self.location.file_path().await?;
    Ok(decode_records(&path, read_elements(&path).await))
  }

  /// Append the record produced by `build`, which sees the stored elements
  /// as they are on disk.
  pub async fn append<F>(&self, build: F) -> Result<T>
  where
    F: FnOnce(&[Value]) -> Result<T> + Send,
  {
    let path = self.location.file_path().await?;
    let _guard = self.write_lock.lock().await;

    let mut elements = read_elements(&path).await;
    let record = build(&elements)?;
    elements.push(serde_json::to_value(&record)?);
    write_elements(&path, &elements).await?;

    Ok(record)
  }
}

/// Integer `id` fields of the stored elements, whatever else they contain.
pub(crate) fn element_ids(elements: &[Value]) -> impl Iterator<Item = i64> + '_ {
  elements
    .iter()
    .filter_map(|element| element.get("id").and_then(Value::as_i64))
}

/// Read a collection file. Anything other than a readable JSON array is
/// reported and treated as an empty collection.
async fn read_elements(path: &Path) -> Vec<Value> {
  let raw = match tokio::fs::read(path).await {
    Ok(raw) => raw,
    Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
    Err(e) => {
      tracing::warn!(path = %path.display(), error = %e, "unreadable collection, treating as empty");
      return Vec::new();
    }
  };

  match serde_json::from_slice::<Value>(&raw) {
    Ok(Value::Array(elements)) => elements,
    Ok(_) => {
      tracing::warn!(path = %path.display(), "collection is not a JSON array, treating as empty");
      Vec::new()
    }
    Err(e) => {
      tracing::warn!(path = %path.display(), error = %e, "malformed collection, treating as empty");
      Vec::new()
    }
  }
}

fn decode_records<T: DeserializeOwned>(path: &Path, elements: Vec<Value>) -> Vec<T> {
  elements
    .into_iter()
    .enumerate()
    .filter_map(|(index, element)| match serde_json::from_value(element) {
      Ok(record) => Some(record),
      Err(e) => {
        tracing::warn!(path = %path.display(), index, error = %e, "skipping undecodable record");
        None
      }
    })
    .collect()
}

/// Replace the collection file atomically: temp file, fsync, rename.
async fn write_elements(path: &Path, elements: &[Value]) -> Result<()> {
  let bytes = serde_json::to_vec_pretty(elements)?;
  let tmp = temp_path(path);

  let write_err = |source| Error::Write {
    path: path.to_path_buf(),
    source,
  };

  let mut file = tokio::fs::File::create(&tmp).await.map_err(write_err)?;
  file.write_all(&bytes).await.map_err(write_err)?;
  file.sync_all().await.map_err(write_err)?;
  drop(file);

  if let Err(e) = tokio::fs::rename(&tmp, path).await {
    let _ = tokio::fs::remove_file(&tmp).await;
    return Err(write_err(e));
  }
  Ok(())
}

static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Unique per write within this process.
fn temp_path(path: &Path) -> PathBuf {
  let name = path
    .file_name()
    .and_then(|s| s.to_str())
    .unwrap_or("collection");
  let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
  path.with_file_name(format!(".{name}.tmp.{}.{seq}", std::process::id()))
}
