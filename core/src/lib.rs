// verdant/core/src/lib.rs

//! Verdant: the domain core of a small plant store.
//!
//!  - `catalog`: plant records, the name/category filter contract, the
//!    `CatalogStore` seam and the `CatalogService` built on it.
//!  - `cart`: a client-side cart engine. Mutations go through a closed set of
//!    `CartCommand`s and a pure `transition`, and every result is written
//!    through to a key-value `CartStorage`.
//!  - `ingest`: a sequential, paginated catalog refresh from a third-party
//!    `ProductSource`, upserting by plant name.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod ingest;

// --- Re-exports for the Public API ---

pub use crate::cart::{
  compute_total, transition, Cart, CartCommand, CartEngine, CartLine, CartStorage, FileStorage, MemoryStorage, CART_STORAGE_KEY,
};
pub use crate::catalog::{
  CatalogService, CatalogStats, CatalogStore, CategoriesInput, MemoryCatalog, NewPlant, Plant, PlantDraft, PlantForm,
  PlantId, PlantQuery,
};
pub use crate::error::{VerdantError, VerdantResult};
pub use crate::ingest::{IngestReport, IngestionJob, ProductPage, ProductSource, RemoteProduct};
