// verdant/app/src/models/plant_row.rs

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;
use verdant::{Plant, PlantId};

/// Column list shared by every query that returns `PlantRow`s.
pub const PLANT_COLUMNS: &str = "id, name, price, categories, availability, image, created_at, updated_at";

#[derive(Debug, Clone, FromRow)]
pub struct PlantRow {
  pub id: Uuid,
  pub name: String,
  pub price: f64,
  pub categories: Vec<String>,
  pub availability: bool,
  pub image: Option<String>,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
}

impl From<PlantRow> for Plant {
  fn from(row: PlantRow) -> Self {
    Plant {
      id: PlantId::new(row.id.to_string()),
      name: row.name,
      price: row.price,
      categories: row.categories,
      availability: row.availability,
      image: row.image,
    }
  }
}
