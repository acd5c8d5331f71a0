// verdant/core/src/cart/storage.rs

//! Key-value media the cart engine persists into.

use crate::error::{VerdantError, VerdantResult};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::NamedTempFile;

/// Fixed key the cart snapshot lives under.
pub const CART_STORAGE_KEY: &str = "plant-store-cart";

/// A string key-value medium.
pub trait CartStorage: Send + Sync {
  /// `Ok(None)` when nothing was stored under `key`.
  fn get(&self, key: &str) -> VerdantResult<Option<String>>;

  /// Overwrites whatever was stored under `key`.
  fn set(&self, key: &str, value: &str) -> VerdantResult<()>;
}

impl<S: CartStorage + ?Sized> CartStorage for Arc<S> {
  fn get(&self, key: &str) -> VerdantResult<Option<String>> {
    (**self).get(key)
  }

  fn set(&self, key: &str, value: &str) -> VerdantResult<()> {
    (**self).set(key, value)
  }
}

/// Volatile in-process medium. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
  entries: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryStorage {
  pub fn new() -> Self {
    Self::default()
  }
}

impl CartStorage for MemoryStorage {
  fn get(&self, key: &str) -> VerdantResult<Option<String>> {
    Ok(self.entries.lock().get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> VerdantResult<()> {
    self.entries.lock().insert(key.to_string(), value.to_string());
    Ok(())
  }
}

/// One file per key inside `dir`. Writes replace the file atomically.
#[derive(Debug, Clone)]
pub struct FileStorage {
  dir: PathBuf,
}

impl FileStorage {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  pub fn dir(&self) -> &Path {
    &self.dir
  }

  pub fn path_for(&self, key: &str) -> PathBuf {
    let file_name: String = key
      .chars()
      .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
      .collect();
    self.dir.join(format!("{}.json", file_name))
  }
}

impl CartStorage for FileStorage {
  fn get(&self, key: &str) -> VerdantResult<Option<String>> {
    let path = self.path_for(key);
    match std::fs::read_to_string(&path) {
      Ok(contents) => Ok(Some(contents)),
      Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
      Err(e) => Err(VerdantError::Persistence(format!(
        "Failed to read {}: {}",
        path.display(),
        e
      ))),
    }
  }

  fn set(&self, key: &str, value: &str) -> VerdantResult<()> {
    let path = self.path_for(key);
    let persist_err =
      |e: std::io::Error| VerdantError::Persistence(format!("Failed to write {}: {}", path.display(), e));

    std::fs::create_dir_all(&self.dir).map_err(persist_err)?;
    let mut tmp = NamedTempFile::new_in(&self.dir).map_err(persist_err)?;
    tmp.write_all(value.as_bytes()).map_err(persist_err)?;
    tmp.flush().map_err(persist_err)?;
    tmp.persist(&path).map_err(|e| persist_err(e.error))?;
    Ok(())
  }
}
