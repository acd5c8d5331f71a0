// verdant/core/src/cart/command.rs

//! The closed set of cart commands and the pure transition over them.

use crate::cart::model::{Cart, CartLine};
use crate::catalog::plant::{Plant, PlantId};

#[derive(Debug, Clone, PartialEq)]
pub enum CartCommand {
  /// Increment the line for `plant.id`, or append a new line.
  Add { plant: Plant, quantity: i32 },
  Remove { plant_id: PlantId },
  /// Absolute quantity. Zero or below removes the line.
  SetQuantity { plant_id: PlantId, quantity: i32 },
  Clear,
  /// Replace the whole cart, as when restoring a persisted snapshot.
  Load(Cart),
}

impl CartCommand {
  pub fn name(&self) -> &'static str {
    match self {
      CartCommand::Add { .. } => "add",
      CartCommand::Remove { .. } => "remove",
      CartCommand::SetQuantity { .. } => "set_quantity",
      CartCommand::Clear => "clear",
      CartCommand::Load(_) => "load",
    }
  }
}

/// Applies one command, producing the next cart. Totals are always derived
/// from the resulting lines.
pub fn transition(cart: &Cart, command: CartCommand) -> Cart {
  match command {
    CartCommand::Add { plant, quantity } => {
      let mut lines = cart.items().to_vec();
      match lines.iter_mut().find(|line| line.plant.id == plant.id) {
        Some(existing) => existing.quantity = existing.quantity.saturating_add(quantity),
        None => lines.push(CartLine::new(plant, quantity)),
      }
      Cart::from_lines(lines)
    }

    CartCommand::Remove { plant_id } => {
      let lines = cart
        .items()
        .iter()
        .filter(|line| line.plant.id != plant_id)
        .cloned()
        .collect();
      Cart::from_lines(lines)
    }

    CartCommand::SetQuantity { plant_id, quantity } => {
      if quantity <= 0 {
        return transition(cart, CartCommand::Remove { plant_id });
      }
      let lines = cart
        .items()
        .iter()
        .map(|line| {
          if line.plant.id == plant_id {
            CartLine::new(line.plant.clone(), quantity)
          } else {
            line.clone()
          }
        })
        .collect();
      Cart::from_lines(lines)
    }

    CartCommand::Clear => Cart::empty(),

    CartCommand::Load(loaded) => Cart::from_lines(loaded.into_lines()),
  }
}
