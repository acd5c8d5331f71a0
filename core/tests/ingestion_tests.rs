// tests/ingestion_tests.rs
mod common;

use common::*;
use std::sync::Arc;
use serde_json::json;
use verdant::ingest::{IngestReport, IngestionJob, ProductPage, RemoteProduct, SkipReason};
use verdant::{MemoryCatalog, PlantDraft};

fn job(source: Arc<ScriptedSource>, store: &MemoryCatalog) -> IngestionJob {
  setup_tracing();
  IngestionJob::new(source, Arc::new(store.clone())).with_page_size(2)
}

#[tokio::test]
async fn test_pages_until_empty_page() {
  let source = Arc::new(ScriptedSource::new(&["indoor"]).with_pages(
    "indoor",
    vec![
      PageScript::Page(vec![remote("Snake Plant", 299.0), remote("Peace Lily", 349.0)]),
      PageScript::Page(vec![remote("Pothos", 199.0)]),
    ],
  ));
  let store = MemoryCatalog::new();

  let report = job(source.clone(), &store).run().await;

  assert_eq!(source.requests_for("indoor"), vec![0, 2, 4]);
  assert_eq!(report.fetched, 3);
  assert_eq!(report.upserted, 3);
  assert!(report.failed_categories.is_empty());
  let names: Vec<String> = store.snapshot().into_iter().map(|p| p.name).collect();
  assert_eq!(names, vec!["Snake Plant", "Peace Lily", "Pothos"]);
}

#[tokio::test]
async fn test_failing_category_does_not_abort_job() {
  let source = Arc::new(
    ScriptedSource::new(&["indoor", "outdoor", "herbs"])
      .with_pages(
        "indoor",
        vec![PageScript::Page(vec![remote("Snake Plant", 299.0), remote("Fern", 99.0)]), PageScript::Fail],
      )
      .with_pages("outdoor", vec![PageScript::Fail])
      .with_pages("herbs", vec![PageScript::Page(vec![remote("Tulsi", 79.0)])]),
  );
  let store = MemoryCatalog::new();

  let report = job(source.clone(), &store).run().await;

  assert_eq!(
    report,
    IngestReport {
      categories: 3,
      fetched: 3,
      upserted: 3,
      skipped: 0,
      failed_upserts: 0,
      failed_categories: vec!["indoor".to_string(), "outdoor".to_string()],
    }
  );
  // Plants fetched before the failing page are kept.
  assert_eq!(store.len(), 3);
  assert_eq!(source.requests_for("herbs"), vec![0, 2]);
}

#[tokio::test]
async fn test_category_fetch_failure_yields_empty_run() {
  let source = Arc::new(ScriptedSource::failing_categories());
  let store = MemoryCatalog::new();
  let report = job(source, &store).run().await;
  assert_eq!(report, IngestReport::default());
  assert!(store.is_empty());
}

#[tokio::test]
async fn test_upsert_by_name_deduplicates_across_categories() {
  let mut in_both = remote("Money Plant", 249.0);
  in_both.categories = Some(vec!["Indoor".to_string(), "Low Maintenance".to_string()]);
  let mut repriced = in_both.clone();
  repriced.our_price = Some(229.0);

  let source = Arc::new(
    ScriptedSource::new(&["indoor", "low-maintenance"])
      .with_pages("indoor", vec![PageScript::Page(vec![in_both])])
      .with_pages("low-maintenance", vec![PageScript::Page(vec![repriced])]),
  );
  let store = MemoryCatalog::with_plants(vec![plant("existing", "Money Plant", 300.0, &["Indoor"])]);

  let report = job(source, &store).run().await;

  assert_eq!(report.upserted, 2);
  let plants = store.snapshot();
  assert_eq!(plants.len(), 1);
  assert_eq!(plants[0].id.as_str(), "existing");
  assert_eq!(plants[0].price, 229.0);
  assert_eq!(plants[0].categories, vec!["Indoor", "Low Maintenance"]);
}

#[tokio::test]
async fn test_unnamed_products_are_skipped() {
  let mut unnamed = remote("ignored", 10.0);
  unnamed.name = None;
  let source = Arc::new(
    ScriptedSource::new(&["indoor"]).with_pages("indoor", vec![PageScript::Page(vec![unnamed, remote("Fern", 99.0)])]),
  );
  let store = MemoryCatalog::new();
  let report = job(source, &store).run().await;
  assert_eq!(report.fetched, 2);
  assert_eq!(report.skipped, 1);
  assert_eq!(report.upserted, 1);
}

#[tokio::test]
async fn test_malformed_record_is_skipped_and_paging_continues() {
  let source = Arc::new(ScriptedSource::new(&["indoor"]).with_pages(
    "indoor",
    vec![
      PageScript::Raw(vec![
        json!({ "name": "Snake Plant", "our_price": 299, "available": 1 }),
        json!({ "name": "Broken", "our_price": "N/A" }),
      ]),
      PageScript::Page(vec![remote("Pothos", 199.0)]),
    ],
  ));
  let store = MemoryCatalog::new();

  let report = job(source.clone(), &store).run().await;

  assert_eq!(source.requests_for("indoor"), vec![0, 2, 4]);
  assert_eq!(report.fetched, 3);
  assert_eq!(report.skipped, 1);
  assert_eq!(report.upserted, 2);
  assert!(report.failed_categories.is_empty());
  let names: Vec<String> = store.snapshot().into_iter().map(|p| p.name).collect();
  assert_eq!(names, vec!["Snake Plant", "Pothos"]);
}

#[test]
fn test_record_decoding_tolerates_nulls() {
  let page: ProductPage = serde_json::from_str(
    r#"{"fileBaseUrl":"https://cdn.example.com","data":[
      {"name":"Areca Palm","our_price":450,"categories":[null,"Indoor"],"images":[{"image":null}],"available":1},
      {"name":"Ivy","list_price":"abc"},
      42
    ]}"#,
  )
  .unwrap();

  let records: Vec<_> = page.products().collect();
  assert_eq!(records.len(), 3);
  let palm = records[0].as_ref().unwrap().to_draft("indoor", "https://cdn.example.com").unwrap();
  assert_eq!(palm.categories, vec!["Indoor"]);
  assert_eq!(palm.image, None);
  assert!(matches!(records[1], Err(SkipReason::Malformed(_))));
  assert!(matches!(records[2], Err(SkipReason::Malformed(_))));
}

#[test]
fn test_null_data_is_an_empty_page() {
  let page: ProductPage = serde_json::from_str(r#"{"data":null}"#).unwrap();
  assert!(page.is_empty());
}

#[test]
fn test_remote_product_mapping() {
  let product: RemoteProduct = serde_json::from_str(
    r#"{"name":"Jade Plant","our_price":0,"list_price":"180","available":1,"images":[{"image":"/p/jade.jpg"},{"image":"/p/jade-2.jpg"}]}"#,
  )
  .unwrap();

  let draft = product.to_draft("succulents", "https://cdn.example.com").unwrap();
  assert_eq!(
    draft,
    PlantDraft {
      name: "Jade Plant".to_string(),
      price: 180.0,
      categories: vec!["succulents".to_string()],
      availability: true,
      image: Some("https://cdn.example.com/p/jade.jpg".to_string()),
    }
  );
}

#[test]
fn test_remote_product_defaults() {
  let product: RemoteProduct = serde_json::from_str(r#"{"name":"Mystery","available":0,"categories":[]}"#).unwrap();
  let draft = product.to_draft("indoor", "").unwrap();
  assert_eq!(draft.price, 0.0);
  assert!(!draft.availability);
  assert!(draft.categories.is_empty());
  assert_eq!(draft.image, None);
}
