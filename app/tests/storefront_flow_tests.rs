// verdant/app/tests/storefront_flow_tests.rs

use std::time::Duration;
use url::Url;
use verdant::{CartEngine, FileStorage, PlantId, CART_STORAGE_KEY};
use verdant_app::services::CatalogClient;

const MONSTERA: &str = r#"{"_id":"65f0c1","name":"Monstera Deliciosa","price":899,"categories":["Indoor"],"availability":true,"image":"https://cdn.example/monstera.jpg"}"#;

#[tokio::test]
async fn fetched_plants_survive_a_new_session() {
  let mut server = mockito::Server::new_async().await;
  let _m = server
    .mock("GET", "/api/plants/65f0c1")
    .with_status(200)
    .with_header("content-type", "application/json")
    .with_body(MONSTERA)
    .create_async()
    .await;

  let dir = tempfile::tempdir().unwrap();
  let api = Url::parse(&format!("{}/api", server.url())).unwrap();
  let client = CatalogClient::new(api, Duration::from_secs(2)).unwrap();

  let plant = client.get(&PlantId::new("65f0c1")).await.unwrap();
  {
    let mut engine = CartEngine::open(FileStorage::new(dir.path()));
    engine.add_to_cart(plant.clone(), None);
    engine.add_to_cart(plant, Some(2));
    assert_eq!(engine.cart_items_count(), 3);
  }

  let storage = FileStorage::new(dir.path());
  assert!(storage.path_for(CART_STORAGE_KEY).exists());

  let engine = CartEngine::open(storage);
  assert_eq!(engine.cart_items_count(), 3);
  assert_eq!(engine.cart().total(), 2697.0);
  let line = engine.cart().line(&PlantId::new("65f0c1")).unwrap();
  assert_eq!(line.plant.name, "Monstera Deliciosa");
}

#[tokio::test]
async fn unreachable_catalog_leaves_the_cart_untouched() {
  let dir = tempfile::tempdir().unwrap();
  // Nothing listens on the discard port.
  let api = Url::parse("http://127.0.0.1:9/api").unwrap();
  let client = CatalogClient::new(api, Duration::from_millis(500)).unwrap();

  let mut engine = CartEngine::open(FileStorage::new(dir.path()));
  let err = client.get(&PlantId::new("65f0c1")).await.unwrap_err();
  assert!(err.is_retryable());
  assert!(engine.cart().is_empty());

  engine.clear_cart();
  assert_eq!(CartEngine::open(FileStorage::new(dir.path())).cart_items_count(), 0);
}
