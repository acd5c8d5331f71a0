// verdant/core/src/catalog/service.rs

use crate::catalog::plant::{NewPlant, Plant, PlantId};
use crate::catalog::query::PlantQuery;
use crate::catalog::store::CatalogStore;
use crate::error::{VerdantError, VerdantResult};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Read and create operations over a catalog store.
///
/// Cheap to clone; every clone talks to the same store.
#[derive(Clone)]
pub struct CatalogService {
  store: Arc<dyn CatalogStore>,
}

impl CatalogService {
  pub fn new(store: Arc<dyn CatalogStore>) -> Self {
    Self { store }
  }

  pub fn store(&self) -> &Arc<dyn CatalogStore> {
    &self.store
  }

  #[instrument(name = "catalog::list", skip(self), err(Display))]
  pub async fn list(&self, query: &PlantQuery) -> VerdantResult<Vec<Plant>> {
    let plants = self.store.list(query).await?;
    info!("Catalog query matched {} plants.", plants.len());
    Ok(plants)
  }

  /// Exact identifier lookup. An unknown identifier is `VerdantError::NotFound`.
  #[instrument(name = "catalog::get", skip(self), fields(plant_id = %id))]
  pub async fn get(&self, id: &PlantId) -> VerdantResult<Plant> {
    match self.store.get(id).await? {
      Some(plant) => Ok(plant),
      None => {
        warn!("Plant {} not found.", id);
        Err(VerdantError::NotFound(format!("Plant {} not found.", id)))
      }
    }
  }

  /// Validates the payload before anything reaches the store.
  #[instrument(name = "catalog::create", skip(self, new_plant), err(Display))]
  pub async fn create(&self, new_plant: NewPlant) -> VerdantResult<Plant> {
    let draft = new_plant.into_draft()?;
    let plant = self.store.insert(draft).await?;
    info!(plant_id = %plant.id, "Created plant '{}'.", plant.name);
    Ok(plant)
  }
}

impl std::fmt::Debug for CatalogService {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CatalogService").finish_non_exhaustive()
  }
}
