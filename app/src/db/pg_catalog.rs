// verdant/app/src/db/pg_catalog.rs

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{error, info, instrument};
use uuid::Uuid;
use verdant::{CatalogStore, Plant, PlantDraft, PlantId, PlantQuery, VerdantResult};

use crate::db::to_domain_error;
use crate::models::{PlantRow, PLANT_COLUMNS};

/// Catalog store over the `plants` table.
///
/// The name/category filter runs in SQL with `strpos` on lower-cased text,
/// which keeps the match a literal substring test.
#[derive(Debug, Clone)]
pub struct PgCatalogStore {
  pool: PgPool,
}

impl PgCatalogStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  pub fn pool(&self) -> &PgPool {
    &self.pool
  }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
  #[instrument(name = "PgCatalogStore::list", skip(self))]
  async fn list(&self, query: &PlantQuery) -> VerdantResult<Vec<Plant>> {
    let sql = format!(
      "SELECT {PLANT_COLUMNS} FROM plants \
       WHERE ($1::TEXT IS NULL OR strpos(lower(name), lower($1::TEXT)) > 0) \
         AND ($2::TEXT IS NULL OR EXISTS ( \
           SELECT 1 FROM unnest(categories) AS c(category) \
           WHERE strpos(lower(c.category), lower($2::TEXT)) > 0)) \
       ORDER BY created_at ASC, id ASC"
    );

    let rows: Vec<PlantRow> = sqlx::query_as(&sql)
      .bind(query.name_filter())
      .bind(query.category_filter())
      .fetch_all(&self.pool)
      .await
      .map_err(|e| {
        error!("Failed to fetch plants from database: {}", e);
        to_domain_error(e)
      })?;

    Ok(rows.into_iter().map(Plant::from).collect())
  }

  #[instrument(name = "PgCatalogStore::get", skip(self), fields(plant_id = %id))]
  async fn get(&self, id: &PlantId) -> VerdantResult<Option<Plant>> {
    // Anything that is not a UUID can never have been assigned by this store.
    let Ok(uuid) = Uuid::parse_str(id.as_str()) else {
      info!("Plant id {} is not a valid identifier.", id);
      return Ok(None);
    };

    let sql = format!("SELECT {PLANT_COLUMNS} FROM plants WHERE id = $1");
    let row: Option<PlantRow> = sqlx::query_as(&sql)
      .bind(uuid)
      .fetch_optional(&self.pool)
      .await
      .map_err(|e| {
        error!("Database error while fetching plant {}: {}", id, e);
        to_domain_error(e)
      })?;

    Ok(row.map(Plant::from))
  }

  #[instrument(name = "PgCatalogStore::insert", skip(self, draft), fields(plant = %draft.name))]
  async fn insert(&self, draft: PlantDraft) -> VerdantResult<Plant> {
    let sql = format!(
      "INSERT INTO plants (id, name, price, categories, availability, image) \
       VALUES ($1, $2, $3, $4, $5, $6) RETURNING {PLANT_COLUMNS}"
    );
    let row: PlantRow = sqlx::query_as(&sql)
      .bind(Uuid::new_v4())
      .bind(&draft.name)
      .bind(draft.price)
      .bind(&draft.categories)
      .bind(draft.availability)
      .bind(&draft.image)
      .fetch_one(&self.pool)
      .await
      .map_err(|e| {
        error!("Failed to insert plant '{}': {}", draft.name, e);
        to_domain_error(e)
      })?;

    Ok(row.into())
  }

  #[instrument(name = "PgCatalogStore::upsert_by_name", skip(self, draft), fields(plant = %draft.name))]
  async fn upsert_by_name(&self, draft: PlantDraft) -> VerdantResult<Plant> {
    let mut tx = self.pool.begin().await.map_err(to_domain_error)?;

    let update_sql = format!(
      "UPDATE plants SET price = $2, categories = $3, availability = $4, image = $5, updated_at = NOW() \
       WHERE id = (SELECT id FROM plants WHERE name = $1 ORDER BY created_at ASC, id ASC LIMIT 1) \
       RETURNING {PLANT_COLUMNS}"
    );
    let updated: Option<PlantRow> = sqlx::query_as(&update_sql)
      .bind(&draft.name)
      .bind(draft.price)
      .bind(&draft.categories)
      .bind(draft.availability)
      .bind(&draft.image)
      .fetch_optional(&mut *tx)
      .await
      .map_err(to_domain_error)?;

    let row = match updated {
      Some(row) => row,
      None => {
        let insert_sql = format!(
          "INSERT INTO plants (id, name, price, categories, availability, image) \
           VALUES ($1, $2, $3, $4, $5, $6) RETURNING {PLANT_COLUMNS}"
        );
        sqlx::query_as(&insert_sql)
          .bind(Uuid::new_v4())
          .bind(&draft.name)
          .bind(draft.price)
          .bind(&draft.categories)
          .bind(draft.availability)
          .bind(&draft.image)
          .fetch_one(&mut *tx)
          .await
          .map_err(to_domain_error)?
      }
    };

    tx.commit().await.map_err(to_domain_error)?;
    Ok(row.into())
  }
}
