// verdant/app/src/lib.rs

//! Application layer around the `verdant` core: the REST server, the
//! PostgreSQL catalog store, the ingestion source and the storefront client.

pub mod config;
pub mod db;
pub mod errors;
pub mod models;
pub mod services;
pub mod state;
pub mod telemetry;
pub mod web;

pub use errors::{AppError, Result};
pub use state::AppState;
