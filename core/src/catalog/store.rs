// verdant/core/src/catalog/store.rs

//! Defines the `CatalogStore` seam between the catalog service and its
//! persistence, plus an in-process implementation.

use crate::catalog::plant::{Plant, PlantDraft, PlantId};
use crate::catalog::query::PlantQuery;
use crate::error::VerdantResult;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Persisted collection of plants.
///
/// `list` returns plants in the store's natural order (insertion order for
/// every implementation in this workspace).
#[async_trait]
pub trait CatalogStore: Send + Sync {
  async fn list(&self, query: &PlantQuery) -> VerdantResult<Vec<Plant>>;

  /// `Ok(None)` when no plant has this identifier, including identifiers the
  /// store could never have assigned.
  async fn get(&self, id: &PlantId) -> VerdantResult<Option<Plant>>;

  async fn insert(&self, draft: PlantDraft) -> VerdantResult<Plant>;

  /// Replaces the first plant whose name equals `draft.name` exactly, keeping
  /// its identifier. Inserts when there is none.
  async fn upsert_by_name(&self, draft: PlantDraft) -> VerdantResult<Plant>;
}

/// Catalog kept in memory. Clones share the same records.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
  plants: Arc<RwLock<Vec<Plant>>>,
}

impl MemoryCatalog {
  pub fn new() -> Self {
    Self::default()
  }

  /// Seeds the catalog with already-identified plants.
  pub fn with_plants(plants: impl IntoIterator<Item = Plant>) -> Self {
    Self {
      plants: Arc::new(RwLock::new(plants.into_iter().collect())),
    }
  }

  pub fn len(&self) -> usize {
    self.plants.read().len()
  }

  pub fn is_empty(&self) -> bool {
    self.plants.read().is_empty()
  }

  pub fn snapshot(&self) -> Vec<Plant> {
    self.plants.read().clone()
  }
}

#[async_trait]
impl CatalogStore for MemoryCatalog {
  #[instrument(name = "MemoryCatalog::list", skip(self), level = "debug")]
  async fn list(&self, query: &PlantQuery) -> VerdantResult<Vec<Plant>> {
    let guard = self.plants.read();
    let found: Vec<Plant> = guard.iter().filter(|p| query.matches(p)).cloned().collect();
    debug!(matched = found.len(), total = guard.len(), "Filtered in-memory catalog.");
    Ok(found)
  }

  async fn get(&self, id: &PlantId) -> VerdantResult<Option<Plant>> {
    Ok(self.plants.read().iter().find(|p| &p.id == id).cloned())
  }

  async fn insert(&self, draft: PlantDraft) -> VerdantResult<Plant> {
    let plant = draft.into_plant(PlantId::generate());
    self.plants.write().push(plant.clone());
    Ok(plant)
  }

  async fn upsert_by_name(&self, draft: PlantDraft) -> VerdantResult<Plant> {
    let mut guard = self.plants.write();
    match guard.iter_mut().find(|p| p.name == draft.name) {
      Some(existing) => {
        let id = existing.id.clone();
        *existing = draft.into_plant(id);
        Ok(existing.clone())
      }
      None => {
        let plant = draft.into_plant(PlantId::generate());
        guard.push(plant.clone());
        Ok(plant)
      }
    }
  }
}
