// verdant/app/tests/pg_catalog_tests.rs
//
// Run with a reachable server:
//   DATABASE_URL=postgres://... cargo test -p verdant_app --test pg_catalog_tests -- --ignored
// Each test gets its own scratch database.

use sqlx::PgPool;
use verdant::{CatalogStore, PlantDraft, PlantId, PlantQuery};
use verdant_app::db::{self, PgCatalogStore};

fn draft(name: &str, price: f64, categories: &[&str]) -> PlantDraft {
  PlantDraft {
    name: name.to_string(),
    price,
    categories: categories.iter().map(|c| c.to_string()).collect(),
    availability: true,
    image: None,
  }
}

async fn seeded(pool: PgPool) -> PgCatalogStore {
  db::ensure_schema(&pool).await.unwrap();
  let store = PgCatalogStore::new(pool);
  for plant in [
    draft("Snake Plant", 299.0, &["Indoor"]),
    draft("Rose", 149.5, &["Outdoor"]),
    draft("Monstera Deliciosa", 899.0, &["Indoor", "Air Purifying"]),
  ] {
    store.insert(plant).await.unwrap();
  }
  store
}

fn names(plants: &[verdant::Plant]) -> Vec<&str> {
  plants.iter().map(|p| p.name.as_str()).collect()
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn sql_filter_matches_the_in_memory_rule(pool: PgPool) {
  let store = seeded(pool).await;

  let all = store.list(&PlantQuery::all()).await.unwrap();
  assert_eq!(names(&all), vec!["Snake Plant", "Rose", "Monstera Deliciosa"]);

  let empty = PlantQuery {
    name: Some(String::new()),
    category: Some(String::new()),
  };
  assert_eq!(store.list(&empty).await.unwrap().len(), 3);

  let found = store.list(&PlantQuery::by_name("PLANT")).await.unwrap();
  assert_eq!(names(&found), vec!["Snake Plant"]);

  let found = store.list(&PlantQuery::by_category("purif")).await.unwrap();
  assert_eq!(names(&found), vec!["Monstera Deliciosa"]);

  let found = store
    .list(&PlantQuery::by_name("xyz").with_category("Indoor"))
    .await
    .unwrap();
  assert!(found.is_empty());

  // Pattern characters are literal.
  let found = store.list(&PlantQuery::by_name("%")).await.unwrap();
  assert!(found.is_empty());
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn upsert_updates_first_match_or_inserts(pool: PgPool) {
  let store = seeded(pool).await;
  let rose_id = store.list(&PlantQuery::by_name("rose")).await.unwrap()[0].id.clone();

  let updated = store
    .upsert_by_name(draft("Rose", 129.0, &["Outdoor", "Flowering"]))
    .await
    .unwrap();
  assert_eq!(updated.id, rose_id);
  assert_eq!(updated.price, 129.0);
  assert_eq!(updated.categories, vec!["Outdoor", "Flowering"]);

  let inserted = store.upsert_by_name(draft("Tulsi", 79.0, &["Herbs"])).await.unwrap();
  assert_ne!(inserted.id, rose_id);

  let all = store.list(&PlantQuery::all()).await.unwrap();
  assert_eq!(names(&all), vec!["Snake Plant", "Rose", "Monstera Deliciosa", "Tulsi"]);
}

#[sqlx::test]
#[ignore = "needs DATABASE_URL pointing at PostgreSQL"]
async fn get_by_id_handles_unknown_and_malformed_ids(pool: PgPool) {
  let store = seeded(pool).await;
  let rose = store.list(&PlantQuery::by_name("rose")).await.unwrap().remove(0);

  assert_eq!(store.get(&rose.id).await.unwrap(), Some(rose));
  assert_eq!(store.get(&PlantId::new("not-a-uuid")).await.unwrap(), None);
  assert_eq!(
    store
      .get(&PlantId::new("00000000-0000-0000-0000-000000000000"))
      .await
      .unwrap(),
    None
  );
}
