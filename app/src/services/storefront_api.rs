// verdant/app/src/services/storefront_api.rs

//! Third-party storefront product API used to populate the catalog.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;
use verdant::ingest::{ProductPage, ProductSource};
use verdant::{VerdantError, VerdantResult};

use crate::errors::Result as AppResult;
use crate::services::http::{build_client, from_reqwest, from_status};

const CATEGORIES_ENTITY: &str = "ms.categories";
const PRODUCTS_ENTITY: &str = "ms.products";
const CATEGORY_LIMIT: usize = 50;

#[derive(Debug, Deserialize)]
struct CategoryEnvelope {
  #[serde(default)]
  data: Vec<CategoryRecord>,
}

#[derive(Debug, Deserialize)]
struct CategoryRecord {
  #[serde(default)]
  alias: Option<String>,
}

#[derive(Debug, Clone)]
pub struct StorefrontApiSource {
  client: reqwest::Client,
  base_url: Url,
}

impl StorefrontApiSource {
  pub fn new(base_url: Url, timeout: Duration) -> AppResult<Self> {
    Ok(Self {
      client: build_client(timeout)?,
      base_url,
    })
  }

  fn entity_url(&self, entity: &str) -> VerdantResult<Url> {
    self
      .base_url
      .join(&format!("api/1/entity/{}", entity))
      .map_err(|e| VerdantError::Upstream(format!("Invalid source URL for {}: {}", entity, e)))
  }

  async fn get_json<T: serde::de::DeserializeOwned>(&self, url: Url, query: &[(&str, String)]) -> VerdantResult<T> {
    let response = self
      .client
      .get(url)
      .query(query)
      .header("app_request", "1")
      .header("frontend", "1")
      .header("ajax", "1")
      .send()
      .await
      .map_err(from_reqwest)?;

    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(from_status(status, &body));
    }
    response.json::<T>().await.map_err(from_reqwest)
  }
}

#[async_trait]
impl ProductSource for StorefrontApiSource {
  #[instrument(name = "storefront_api::categories", skip(self))]
  async fn categories(&self) -> VerdantResult<Vec<String>> {
    let filters = json!([{ "field": "publish", "type": "manual", "value": "1" }]).to_string();
    let envelope: CategoryEnvelope = self
      .get_json(
        self.entity_url(CATEGORIES_ENTITY)?,
        &[
          ("limit", CATEGORY_LIMIT.to_string()),
          ("start", "0".to_string()),
          ("filters", filters),
        ],
      )
      .await?;

    let aliases: Vec<String> = envelope.data.into_iter().filter_map(|c| c.alias).collect();
    debug!("Source listed {} categories.", aliases.len());
    Ok(aliases)
  }

  #[instrument(name = "storefront_api::fetch_page", skip(self))]
  async fn fetch_page(&self, category: &str, start: usize, limit: usize) -> VerdantResult<ProductPage> {
    let filters = json!([
      { "field": "categories", "type": "manual", "value": [category] },
      { "field": "publish", "type": "manual", "value": "1" }
    ])
    .to_string();

    self
      .get_json(
        self.entity_url(PRODUCTS_ENTITY)?,
        &[
          ("limit", limit.to_string()),
          ("start", start.to_string()),
          ("filters", filters),
        ],
      )
      .await
  }
}
