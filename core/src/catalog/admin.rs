// verdant/core/src/catalog/admin.rs

//! Catalog administration helpers: the add-plant form and dashboard figures.

use crate::catalog::plant::{CategoriesInput, NewPlant, Plant};
use crate::error::{VerdantError, VerdantResult};
use serde::Serialize;

/// Add-plant form as filled in by an administrator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlantForm {
  pub name: String,
  pub price: f64,
  pub categories: Vec<String>,
  pub available: bool,
  pub image: Option<String>,
}

impl PlantForm {
  /// Checks the form before anything is sent and builds the creation payload.
  /// Category labels are trimmed and de-duplicated, keeping the first spelling.
  pub fn into_new_plant(self) -> VerdantResult<NewPlant> {
    let name = self.name.trim();
    if name.is_empty() {
      return Err(VerdantError::Validation("Plant name is required.".to_string()));
    }
    if !self.price.is_finite() || self.price <= 0.0 {
      return Err(VerdantError::Validation("Price must be greater than 0.".to_string()));
    }

    let mut categories: Vec<String> = Vec::new();
    for label in self.categories.iter().map(|c| c.trim()).filter(|c| !c.is_empty()) {
      if !categories.iter().any(|existing| existing == label) {
        categories.push(label.to_string());
      }
    }
    if categories.is_empty() {
      return Err(VerdantError::Validation("At least one category is required.".to_string()));
    }

    Ok(NewPlant {
      name: Some(name.to_string()),
      price: Some(self.price),
      categories: CategoriesInput::List(categories),
      availability: Some(self.available),
      image: self.image.map(|url| url.trim().to_string()).filter(|url| !url.is_empty()),
    })
  }
}

/// Dashboard summary of a catalog listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CatalogStats {
  pub total_plants: usize,
  pub in_stock: usize,
  pub out_of_stock: usize,
  /// Sum of list prices, one unit per plant.
  pub total_value: f64,
}

impl CatalogStats {
  pub fn from_plants(plants: &[Plant]) -> Self {
    let in_stock = plants.iter().filter(|p| p.availability).count();
    Self {
      total_plants: plants.len(),
      in_stock,
      out_of_stock: plants.len() - in_stock,
      total_value: plants.iter().fold(0.0, |sum, p| sum + p.price),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::plant::PlantId;

  fn form() -> PlantForm {
    PlantForm {
      name: " Areca Palm ".to_string(),
      price: 450.0,
      categories: vec!["Indoor".into(), " Air Purifying ".into(), "Indoor".into(), "  ".into()],
      available: true,
      image: Some("   ".to_string()),
    }
  }

  #[test]
  fn form_normalizes_into_payload() {
    let payload = form().into_new_plant().unwrap();
    assert_eq!(payload.name.as_deref(), Some("Areca Palm"));
    assert_eq!(payload.price, Some(450.0));
    assert_eq!(
      payload.categories,
      CategoriesInput::List(vec!["Indoor".to_string(), "Air Purifying".to_string()])
    );
    assert_eq!(payload.availability, Some(true));
    assert_eq!(payload.image, None);

    let draft = payload.into_draft().unwrap();
    assert_eq!(draft.name, "Areca Palm");
  }

  #[test]
  fn form_rejects_missing_fields() {
    let blank = PlantForm { name: "  ".into(), ..form() };
    assert!(matches!(blank.into_new_plant(), Err(VerdantError::Validation(_))));

    let free = PlantForm { price: 0.0, ..form() };
    assert!(matches!(free.into_new_plant(), Err(VerdantError::Validation(_))));

    let uncategorized = PlantForm {
      categories: vec![" ".into()],
      ..form()
    };
    let err = uncategorized.into_new_plant().unwrap_err();
    assert_eq!(err.to_string(), "Validation failed: At least one category is required.");
  }

  #[test]
  fn stats_count_stock_and_value() {
    let plant = |id: &str, price: f64, availability: bool| Plant {
      id: PlantId::new(id),
      name: id.to_string(),
      price,
      categories: Vec::new(),
      availability,
      image: None,
    };
    let stats = CatalogStats::from_plants(&[plant("a", 299.0, true), plant("b", 149.5, false), plant("c", 51.5, true)]);
    assert_eq!(
      stats,
      CatalogStats {
        total_plants: 3,
        in_stock: 2,
        out_of_stock: 1,
        total_value: 500.0,
      }
    );
    assert_eq!(CatalogStats::from_plants(&[]), CatalogStats::default());
  }
}
