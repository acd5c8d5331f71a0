// verdant/core/src/cart/model.rs

use crate::catalog::plant::{Plant, PlantId};
use serde::{Deserialize, Serialize};

/// One plant in the cart. `plant` is the snapshot taken when the line was
/// first added.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
  pub plant: Plant,
  pub quantity: i32,
}

impl CartLine {
  pub fn new(plant: Plant, quantity: i32) -> Self {
    Self { plant, quantity }
  }

  pub fn subtotal(&self) -> f64 {
    self.plant.price * f64::from(self.quantity)
  }
}

/// Lines in insertion order plus their derived total.
///
/// The total cannot be set directly: every constructor, including
/// deserialization, derives it from the lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "CartSnapshot")]
pub struct Cart {
  items: Vec<CartLine>,
  total: f64,
}

/// Wire shape of a persisted cart. The stored `total` is not read back.
#[derive(Deserialize)]
struct CartSnapshot {
  items: Vec<CartLine>,
}

impl From<CartSnapshot> for Cart {
  fn from(snapshot: CartSnapshot) -> Self {
    Cart::from_lines(snapshot.items)
  }
}

impl Cart {
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn from_lines(items: Vec<CartLine>) -> Self {
    let total = compute_total(&items);
    Self { items, total }
  }

  pub fn items(&self) -> &[CartLine] {
    &self.items
  }

  pub fn total(&self) -> f64 {
    self.total
  }

  pub fn is_empty(&self) -> bool {
    self.items.is_empty()
  }

  pub fn line(&self, plant_id: &PlantId) -> Option<&CartLine> {
    self.items.iter().find(|line| &line.plant.id == plant_id)
  }

  /// Sum of quantities across all lines, not the number of lines.
  pub fn items_count(&self) -> i64 {
    self.items.iter().map(|line| i64::from(line.quantity)).sum()
  }

  pub fn into_lines(self) -> Vec<CartLine> {
    self.items
  }
}

/// `Σ price × quantity`, summed in line order.
pub fn compute_total(lines: &[CartLine]) -> f64 {
  lines.iter().fold(0.0, |total, line| total + line.subtotal())
}
