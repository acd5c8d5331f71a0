// verdant/core/src/catalog/plant.rs

//! Plant records as stored in the catalog, and the creation payload that
//! produces them.

use crate::error::{VerdantError, VerdantResult};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Server-assigned plant identifier. Opaque to clients.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(String);

impl PlantId {
  pub fn new(id: impl Into<String>) -> Self {
    PlantId(id.into())
  }

  /// Fresh identifier for stores that assign ids themselves.
  pub fn generate() -> Self {
    PlantId(uuid::Uuid::new_v4().to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for PlantId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

impl From<String> for PlantId {
  fn from(s: String) -> Self {
    PlantId(s)
  }
}

impl From<&str> for PlantId {
  fn from(s: &str) -> Self {
    PlantId(s.to_string())
  }
}

fn default_availability() -> bool {
  true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plant {
  #[serde(alias = "_id")]
  pub id: PlantId,
  pub name: String,
  pub price: f64,
  #[serde(default)]
  pub categories: Vec<String>,
  #[serde(default = "default_availability")]
  pub availability: bool,
  #[serde(default)]
  pub image: Option<String>,
}

/// A plant that has not been assigned an identifier yet.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantDraft {
  pub name: String,
  pub price: f64,
  pub categories: Vec<String>,
  pub availability: bool,
  pub image: Option<String>,
}

impl PlantDraft {
  pub fn into_plant(self, id: PlantId) -> Plant {
    Plant {
      id,
      name: self.name,
      price: self.price,
      categories: self.categories,
      availability: self.availability,
      image: self.image,
    }
  }
}

/// Categories as submitted by the admin form: either already split, or a
/// single comma-joined string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoriesInput {
  List(Vec<String>),
  Joined(String),
}

impl Default for CategoriesInput {
  fn default() -> Self {
    CategoriesInput::List(Vec::new())
  }
}

impl CategoriesInput {
  /// Joined strings are split on commas and trimmed; empty segments are dropped.
  /// Lists are kept as given.
  pub fn normalize(self) -> Vec<String> {
    match self {
      CategoriesInput::List(list) => list,
      CategoriesInput::Joined(joined) => joined
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect(),
    }
  }
}

/// Creation payload for `POST /plants`.
///
/// `name` and `price` are optional at the parsing layer so that a missing
/// field is reported as a validation failure rather than a malformed body.
/// Form-style clients send numbers and booleans as strings; both shapes are
/// accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewPlant {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default, deserialize_with = "lenient_number")]
  pub price: Option<f64>,
  #[serde(default)]
  pub categories: CategoriesInput,
  #[serde(default, deserialize_with = "lenient_bool")]
  pub availability: Option<bool>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub image: Option<String>,
}

impl NewPlant {
  /// Validates the payload and normalizes it into a draft ready for insertion.
  pub fn into_draft(self) -> VerdantResult<PlantDraft> {
    let name = self
      .name
      .as_deref()
      .map(str::trim)
      .filter(|n| !n.is_empty())
      .ok_or_else(|| VerdantError::Validation("Plant name is required.".to_string()))?
      .to_string();

    let price = self
      .price
      .ok_or_else(|| VerdantError::Validation("Plant price is required.".to_string()))?;
    if !price.is_finite() || price <= 0.0 {
      return Err(VerdantError::Validation(format!(
        "Plant price must be a positive number, got {}.",
        price
      )));
    }

    let image = self
      .image
      .map(|url| url.trim().to_string())
      .filter(|url| !url.is_empty());

    Ok(PlantDraft {
      name,
      price,
      categories: self.categories.normalize(),
      availability: self.availability.unwrap_or(true),
      image,
    })
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
  Number(f64),
  Text(String),
}

pub(crate) fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
  D: Deserializer<'de>,
{
  match Option::<NumberOrString>::deserialize(deserializer)? {
    None => Ok(None),
    Some(NumberOrString::Number(n)) => Ok(Some(n)),
    Some(NumberOrString::Text(s)) if s.trim().is_empty() => Ok(None),
    Some(NumberOrString::Text(s)) => s
      .trim()
      .parse::<f64>()
      .map(Some)
      .map_err(|_| serde::de::Error::custom(format!("invalid number '{}'", s))),
  }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum BoolOrString {
  Bool(bool),
  Text(String),
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
  D: Deserializer<'de>,
{
  match Option::<BoolOrString>::deserialize(deserializer)? {
    None => Ok(None),
    Some(BoolOrString::Bool(b)) => Ok(Some(b)),
    Some(BoolOrString::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
      "" => Ok(None),
      "true" | "1" | "on" | "yes" => Ok(Some(true)),
      "false" | "0" | "off" | "no" => Ok(Some(false)),
      other => Err(serde::de::Error::custom(format!("invalid boolean '{}'", other))),
    },
  }
}
