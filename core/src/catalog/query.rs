// verdant/core/src/catalog/query.rs

//! The catalog filter contract shared by every store implementation.

use crate::catalog::plant::Plant;
use serde::Deserialize;

/// Name and category filters for listing plants.
///
/// Both filters are optional and combine with AND. An empty string is the
/// same as an absent filter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PlantQuery {
  #[serde(default)]
  pub name: Option<String>,
  #[serde(default)]
  pub category: Option<String>,
}

impl PlantQuery {
  pub fn all() -> Self {
    Self::default()
  }

  pub fn by_name(name: impl Into<String>) -> Self {
    Self {
      name: Some(name.into()),
      category: None,
    }
  }

  pub fn by_category(category: impl Into<String>) -> Self {
    Self {
      name: None,
      category: Some(category.into()),
    }
  }

  pub fn with_name(mut self, name: impl Into<String>) -> Self {
    self.name = Some(name.into());
    self
  }

  pub fn with_category(mut self, category: impl Into<String>) -> Self {
    self.category = Some(category.into());
    self
  }

  /// Name filter, if one is in effect.
  pub fn name_filter(&self) -> Option<&str> {
    self.name.as_deref().filter(|n| !n.is_empty())
  }

  /// Category filter, if one is in effect.
  pub fn category_filter(&self) -> Option<&str> {
    self.category.as_deref().filter(|c| !c.is_empty())
  }

  pub fn is_unfiltered(&self) -> bool {
    self.name_filter().is_none() && self.category_filter().is_none()
  }

  pub fn matches(&self, plant: &Plant) -> bool {
    let name_ok = self
      .name_filter()
      .map_or(true, |needle| contains_ignore_case(&plant.name, needle));
    let category_ok = self.category_filter().map_or(true, |needle| {
      plant
        .categories
        .iter()
        .any(|category| contains_ignore_case(category, needle))
    });
    name_ok && category_ok
  }
}

/// Literal, case-insensitive substring containment.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
  haystack.to_lowercase().contains(&needle.to_lowercase())
}
