// verdant/core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VerdantError {
  /// Creation-time rejection. Nothing was persisted.
  #[error("Validation failed: {0}")]
  Validation(String),

  #[error("Not found: {0}")]
  NotFound(String),

  /// Transient failure of the store or the network. Callers may retry.
  #[error("Service temporarily unavailable. Source: {source}")]
  Unavailable {
    #[source]
    source: AnyhowError,
  },

  #[error("Catalog store error. Source: {source}")]
  Store {
    #[source]
    source: AnyhowError,
  },

  #[error("Upstream product source returned an unusable response: {0}")]
  Upstream(String),

  #[error("Cart persistence error: {0}")]
  Persistence(String),

  #[error("Serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl VerdantError {
  pub fn unavailable(err: impl Into<AnyhowError>) -> Self {
    VerdantError::Unavailable { source: err.into() }
  }

  pub fn store(err: impl Into<AnyhowError>) -> Self {
    VerdantError::Store { source: err.into() }
  }

  /// Whether repeating the same request may succeed.
  pub fn is_retryable(&self) -> bool {
    matches!(self, VerdantError::Unavailable { .. })
  }

  pub fn is_not_found(&self) -> bool {
    matches!(self, VerdantError::NotFound(_))
  }
}

pub type VerdantResult<T, E = VerdantError> = std::result::Result<T, E>;
