// verdant/core/src/ingest/source.rs

//! Shapes returned by the third-party storefront API and their mapping into
//! catalog drafts.

use crate::catalog::plant::{lenient_number, PlantDraft};
use crate::error::VerdantResult;
use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A paginated source of products grouped by category.
#[async_trait]
pub trait ProductSource: Send + Sync {
  /// Published category aliases.
  async fn categories(&self) -> VerdantResult<Vec<String>>;

  /// One page of published products in `category`, starting at offset `start`.
  /// An empty page marks the end of the category.
  async fn fetch_page(&self, category: &str, start: usize, limit: usize) -> VerdantResult<ProductPage>;
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPage {
  /// Prefix for relative image paths.
  #[serde(rename = "fileBaseUrl", default)]
  pub file_base_url: Option<String>,
  /// Raw records. `products` decodes each one separately.
  #[serde(default, deserialize_with = "records")]
  pub data: Vec<Value>,
}

impl ProductPage {
  pub fn from_products(file_base_url: Option<String>, products: impl IntoIterator<Item = RemoteProduct>) -> Self {
    Self {
      file_base_url,
      data: products
        .into_iter()
        .filter_map(|product| serde_json::to_value(product).ok())
        .collect(),
    }
  }

  pub fn len(&self) -> usize {
    self.data.len()
  }

  pub fn is_empty(&self) -> bool {
    self.data.is_empty()
  }

  /// Decodes every record in page order.
  pub fn products(&self) -> impl Iterator<Item = Result<RemoteProduct, SkipReason>> + '_ {
    self.data.iter().map(RemoteProduct::from_value)
  }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteImage {
  #[serde(default)]
  pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RemoteProduct {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default, deserialize_with = "lenient_number")]
  pub our_price: Option<f64>,
  #[serde(default, deserialize_with = "lenient_number")]
  pub list_price: Option<f64>,
  /// Null labels are dropped.
  #[serde(default, deserialize_with = "labels")]
  pub categories: Option<Vec<String>>,
  /// `1` means available; anything else, including a missing value, does not.
  #[serde(default)]
  pub available: Option<Value>,
  #[serde(default)]
  pub images: Option<Vec<RemoteImage>>,
}

/// Why a remote product was left out of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
  /// The record could not be decoded at all.
  Malformed(String),
  MissingName,
  InvalidPrice(f64),
}

impl std::fmt::Display for SkipReason {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      SkipReason::Malformed(e) => write!(f, "product record is malformed: {}", e),
      SkipReason::MissingName => f.write_str("product has no name"),
      SkipReason::InvalidPrice(p) => write!(f, "product price {} is not a valid amount", p),
    }
  }
}

fn records<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
  D: Deserializer<'de>,
{
  Ok(Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default())
}

fn labels<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
  D: Deserializer<'de>,
{
  let raw = Option::<Vec<Option<String>>>::deserialize(deserializer)?;
  Ok(raw.map(|list| list.into_iter().flatten().collect()))
}

impl RemoteProduct {
  pub fn from_value(record: &Value) -> Result<Self, SkipReason> {
    RemoteProduct::deserialize(record).map_err(|e| SkipReason::Malformed(e.to_string()))
  }

  /// First non-zero of `our_price` and `list_price`, else zero.
  pub fn effective_price(&self) -> f64 {
    [self.our_price, self.list_price]
      .into_iter()
      .flatten()
      .find(|p| *p != 0.0)
      .unwrap_or(0.0)
  }

  pub fn is_available(&self) -> bool {
    self
      .available
      .as_ref()
      .and_then(Value::as_f64)
      .is_some_and(|v| v == 1.0)
  }

  /// Maps the product into a draft. `category` is the category being scraped,
  /// used when the product lists none of its own.
  pub fn to_draft(&self, category: &str, file_base_url: &str) -> Result<PlantDraft, SkipReason> {
    let name = self
      .name
      .as_deref()
      .map(str::trim)
      .filter(|n| !n.is_empty())
      .ok_or(SkipReason::MissingName)?
      .to_string();

    let price = self.effective_price();
    if !price.is_finite() || price < 0.0 {
      return Err(SkipReason::InvalidPrice(price));
    }

    let categories = match &self.categories {
      Some(list) => list.clone(),
      None => vec![category.to_string()],
    };

    let image = self
      .images
      .as_ref()
      .and_then(|images| images.first())
      .and_then(|first| first.image.as_deref())
      .filter(|path| !path.is_empty())
      .map(|path| format!("{}{}", file_base_url, path));

    Ok(PlantDraft {
      name,
      price,
      categories,
      availability: self.is_available(),
      image,
    })
  }
}
