// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::{
  atomic::{AtomicUsize, Ordering},
  Arc,
};
use tracing::Level;
use verdant::ingest::{ProductPage, ProductSource, RemoteImage, RemoteProduct};
use verdant::{CartStorage, Plant, PlantId, VerdantError, VerdantResult};

// --- Plant fixtures ---
pub fn plant(id: &str, name: &str, price: f64, categories: &[&str]) -> Plant {
  Plant {
    id: PlantId::new(id),
    name: name.to_string(),
    price,
    categories: categories.iter().map(|c| c.to_string()).collect(),
    availability: true,
    image: None,
  }
}

pub fn snake_plant() -> Plant {
  plant("p-snake", "Snake Plant", 299.0, &["Indoor"])
}

pub fn rose() -> Plant {
  plant("p-rose", "Rose", 149.5, &["Outdoor"])
}

pub fn monstera() -> Plant {
  plant("p-monstera", "Monstera Deliciosa", 899.0, &["Indoor", "Air Purifying"])
}

// --- Storage doubles ---

/// Storage whose reads and/or writes always fail. Counts write attempts.
#[derive(Debug, Default)]
pub struct FailingStorage {
  pub fail_reads: bool,
  pub fail_writes: bool,
  pub writes_attempted: AtomicUsize,
  pub entries: Mutex<HashMap<String, String>>,
}

impl FailingStorage {
  pub fn failing_reads() -> Self {
    Self {
      fail_reads: true,
      ..Default::default()
    }
  }

  pub fn failing_writes() -> Self {
    Self {
      fail_writes: true,
      ..Default::default()
    }
  }

  pub fn writes(&self) -> usize {
    self.writes_attempted.load(Ordering::SeqCst)
  }
}

impl CartStorage for FailingStorage {
  fn get(&self, key: &str) -> VerdantResult<Option<String>> {
    if self.fail_reads {
      return Err(VerdantError::Persistence("medium unavailable".to_string()));
    }
    Ok(self.entries.lock().get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> VerdantResult<()> {
    self.writes_attempted.fetch_add(1, Ordering::SeqCst);
    if self.fail_writes {
      return Err(VerdantError::Persistence("medium is read-only".to_string()));
    }
    self.entries.lock().insert(key.to_string(), value.to_string());
    Ok(())
  }
}

// --- Product source double ---

pub fn remote(name: &str, our_price: f64) -> RemoteProduct {
  RemoteProduct {
    name: Some(name.to_string()),
    our_price: Some(our_price),
    list_price: None,
    categories: None,
    available: Some(serde_json::json!(1)),
    images: Some(vec![RemoteImage {
      image: Some(format!("/img/{}.jpg", name.to_lowercase().replace(' ', "-"))),
    }]),
  }
}

/// What a scripted category returns for each successive page request.
#[derive(Debug, Clone)]
pub enum PageScript {
  Page(Vec<RemoteProduct>),
  /// Records exactly as the wire would carry them.
  Raw(Vec<serde_json::Value>),
  Fail,
}

/// Replays a fixed script of pages per category and records every request.
#[derive(Default)]
pub struct ScriptedSource {
  pub categories: Option<Vec<String>>,
  pub pages: HashMap<String, Vec<PageScript>>,
  pub requests: Mutex<Vec<(String, usize, usize)>>,
}

impl ScriptedSource {
  pub fn new(categories: &[&str]) -> Self {
    Self {
      categories: Some(categories.iter().map(|c| c.to_string()).collect()),
      ..Default::default()
    }
  }

  pub fn failing_categories() -> Self {
    Self::default()
  }

  pub fn with_pages(mut self, category: &str, pages: Vec<PageScript>) -> Self {
    self.pages.insert(category.to_string(), pages);
    self
  }

  pub fn requests_for(&self, category: &str) -> Vec<usize> {
    self
      .requests
      .lock()
      .iter()
      .filter(|(c, _, _)| c == category)
      .map(|(_, start, _)| *start)
      .collect()
  }
}

#[async_trait]
impl ProductSource for ScriptedSource {
  async fn categories(&self) -> VerdantResult<Vec<String>> {
    self
      .categories
      .clone()
      .ok_or_else(|| VerdantError::Upstream("categories endpoint returned 502".to_string()))
  }

  async fn fetch_page(&self, category: &str, start: usize, limit: usize) -> VerdantResult<ProductPage> {
    let page_index = {
      let mut requests = self.requests.lock();
      let index = requests.iter().filter(|(c, _, _)| c == category).count();
      requests.push((category.to_string(), start, limit));
      index
    };
    let script = self.pages.get(category).and_then(|pages| pages.get(page_index)).cloned();
    match script {
      Some(PageScript::Page(products)) => Ok(ProductPage::from_products(
        Some("https://cdn.example.com".to_string()),
        products,
      )),
      Some(PageScript::Raw(data)) => Ok(ProductPage {
        file_base_url: Some("https://cdn.example.com".to_string()),
        data,
      }),
      Some(PageScript::Fail) => Err(VerdantError::Upstream(format!("page {} of {} timed out", page_index, category))),
      None => Ok(ProductPage::default()),
    }
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

pub fn shared<T>(value: T) -> Arc<T> {
  Arc::new(value)
}
