// verdant/app/src/db/mod.rs

//! PostgreSQL connection setup, schema bootstrap and the sqlx-backed catalog store.

pub mod pg_catalog;

pub use pg_catalog::PgCatalogStore;

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use verdant::VerdantError;

use crate::errors::Result;

const SCHEMA: [&str; 2] = [
  r#"
  CREATE TABLE IF NOT EXISTS plants (
    id UUID PRIMARY KEY,
    name TEXT NOT NULL CHECK (length(name) > 0),
    price DOUBLE PRECISION NOT NULL CHECK (price >= 0),
    categories TEXT[] NOT NULL DEFAULT '{}',
    availability BOOLEAN NOT NULL DEFAULT TRUE,
    image TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
  )
  "#,
  "CREATE INDEX IF NOT EXISTS plants_name_idx ON plants (name)",
];

pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool> {
  let pool = PgPoolOptions::new()
    .max_connections(max_connections)
    .acquire_timeout(Duration::from_secs(5))
    .connect(database_url)
    .await?;
  Ok(pool)
}

/// Creates the catalog tables if they do not exist yet.
pub async fn ensure_schema(pool: &PgPool) -> Result<()> {
  for statement in SCHEMA {
    sqlx::query(statement).execute(pool).await?;
  }
  tracing::info!("Catalog schema is in place.");
  Ok(())
}

/// Failures where retrying the same request later can succeed.
pub fn is_transient(err: &sqlx::Error) -> bool {
  matches!(
    err,
    sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed
  )
}

pub fn to_domain_error(err: sqlx::Error) -> VerdantError {
  if is_transient(&err) {
    VerdantError::unavailable(err)
  } else {
    VerdantError::store(err)
  }
}
