// verdant/app/src/state.rs
use std::sync::Arc;
use verdant::{CatalogService, CatalogStore};

#[derive(Clone, Debug)]
pub struct AppState {
  pub catalog: CatalogService,
}

impl AppState {
  pub fn new(store: Arc<dyn CatalogStore>) -> Self {
    Self {
      catalog: CatalogService::new(store),
    }
  }
}
