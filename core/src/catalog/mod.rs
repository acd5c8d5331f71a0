pub mod admin;
pub mod plant;
pub mod query;
pub mod service;
pub mod store;

pub use admin::{CatalogStats, PlantForm};
pub use plant::{CategoriesInput, NewPlant, Plant, PlantDraft, PlantId};
pub use query::PlantQuery;
pub use service::CatalogService;
pub use store::{CatalogStore, MemoryCatalog};
