// verdant/app/src/services/catalog_client.rs

//! HTTP client for the catalog REST API, used by the terminal storefront.

use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use tracing::{instrument, warn};
use url::Url;
use verdant::{NewPlant, Plant, PlantId, PlantQuery, VerdantError, VerdantResult};

use crate::errors::{AppError, Result as AppResult};
use crate::services::http::{build_client, from_reqwest, from_status};

#[derive(Debug, Deserialize)]
struct ErrorBody {
  error: String,
}

#[derive(Debug, Clone)]
pub struct CatalogClient {
  client: reqwest::Client,
  api_url: Url,
  retries: u32,
  retry_delay: Duration,
}

impl CatalogClient {
  pub fn new(api_url: Url, timeout: Duration) -> AppResult<Self> {
    if api_url.cannot_be_a_base() {
      return Err(AppError::Config(format!("API URL '{}' cannot be used as a base", api_url)));
    }
    Ok(Self {
      client: build_client(timeout)?,
      api_url,
      retries: 0,
      retry_delay: Duration::from_millis(500),
    })
  }

  /// Extra attempts for requests that fail with a retryable error.
  pub fn with_retries(mut self, retries: u32, retry_delay: Duration) -> Self {
    self.retries = retries;
    self.retry_delay = retry_delay;
    self
  }

  fn url(&self, segments: &[&str]) -> Url {
    let mut url = self.api_url.clone();
    if let Ok(mut path) = url.path_segments_mut() {
      path.pop_if_empty().extend(segments);
    }
    url
  }

  #[instrument(name = "catalog_client::list", skip(self))]
  pub async fn list(&self, query: &PlantQuery) -> VerdantResult<Vec<Plant>> {
    let mut params = Vec::new();
    if let Some(name) = query.name_filter() {
      params.push(("name", name.to_string()));
    }
    if let Some(category) = query.category_filter() {
      params.push(("category", category.to_string()));
    }
    let url = self.url(&["plants"]);
    self.with_retry(|| self.get_json(url.clone(), &params, "Plant listing")).await
  }

  #[instrument(name = "catalog_client::get", skip(self), fields(plant_id = %id))]
  pub async fn get(&self, id: &PlantId) -> VerdantResult<Plant> {
    let url = self.url(&["plants", id.as_str()]);
    let what = format!("Plant {}", id);
    self.with_retry(|| self.get_json(url.clone(), &[], &what)).await
  }

  /// Sends one creation request. Retries do not apply here.
  #[instrument(name = "catalog_client::create", skip(self, new_plant))]
  pub async fn create(&self, new_plant: &NewPlant) -> VerdantResult<Plant> {
    let response = self
      .client
      .post(self.url(&["plants"]))
      .json(new_plant)
      .send()
      .await
      .map_err(from_reqwest)?;
    read_json(response, "Plant").await
  }

  async fn with_retry<T, F, Fut>(&self, mut attempt: F) -> VerdantResult<T>
  where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = VerdantResult<T>>,
  {
    let mut attempts_left = self.retries;
    loop {
      match attempt().await {
        Err(e) if e.is_retryable() && attempts_left > 0 => {
          attempts_left -= 1;
          warn!(error = %e, attempts_left, "Catalog request failed, retrying.");
          tokio::time::sleep(self.retry_delay).await;
        }
        result => return result,
      }
    }
  }

  async fn get_json<T: DeserializeOwned>(&self, url: Url, params: &[(&str, String)], what: &str) -> VerdantResult<T> {
    let response = self
      .client
      .get(url)
      .query(params)
      .send()
      .await
      .map_err(from_reqwest)?;
    read_json(response, what).await
  }
}

/// Decodes a success body, or turns the catalog's `{"error": ..}` replies
/// into domain errors.
async fn read_json<T: DeserializeOwned>(response: reqwest::Response, what: &str) -> VerdantResult<T> {
  let status = response.status();
  if status == StatusCode::NOT_FOUND {
    let message = response
      .json::<ErrorBody>()
      .await
      .map(|body| body.error)
      .unwrap_or_else(|_| format!("{} not found.", what));
    return Err(VerdantError::NotFound(message));
  }
  if status == StatusCode::BAD_REQUEST {
    let message = response
      .json::<ErrorBody>()
      .await
      .map(|body| body.error)
      .unwrap_or_else(|_| format!("{} was rejected by the catalog.", what));
    return Err(VerdantError::Validation(message));
  }
  if !status.is_success() {
    let body = response.text().await.unwrap_or_default();
    return Err(from_status(status, &body));
  }
  response.json::<T>().await.map_err(from_reqwest)
}
