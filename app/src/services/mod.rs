// verdant/app/src/services/mod.rs

pub mod catalog_client;
pub mod http;
pub mod storefront_api;

pub use catalog_client::CatalogClient;
pub use storefront_api::StorefrontApiSource;
