// verdant/core/src/cart/engine.rs

//! The client-side cart engine: owns one cart, applies commands through
//! `transition`, and writes the result through to its storage medium.

use crate::cart::command::{transition, CartCommand};
use crate::cart::model::Cart;
use crate::cart::storage::{CartStorage, CART_STORAGE_KEY};
use crate::catalog::plant::{Plant, PlantId};
use crate::error::{VerdantError, VerdantResult};
use tracing::{debug, warn};

/// Quantity used by `add_to_cart` when the caller gives none.
pub const DEFAULT_ADD_QUANTITY: i32 = 1;

/// Single-owner cart state machine.
///
/// Operations never fail from the caller's point of view. Storage problems
/// are logged and the in-memory cart stays authoritative.
pub struct CartEngine<S: CartStorage> {
  cart: Cart,
  storage: S,
  key: String,
}

impl<S: CartStorage> CartEngine<S> {
  /// Opens the engine under the default key, restoring a previous snapshot
  /// when one can be read and parsed.
  pub fn open(storage: S) -> Self {
    Self::open_with_key(storage, CART_STORAGE_KEY)
  }

  pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
    let mut engine = Self {
      cart: Cart::empty(),
      storage,
      key: key.into(),
    };

    match engine.restore() {
      Ok(Some(saved)) => {
        debug!(key = %engine.key, lines = saved.items().len(), "Restored persisted cart.");
        engine.dispatch(CartCommand::Load(saved));
      }
      Ok(None) => {
        debug!(key = %engine.key, "No persisted cart found, starting empty.");
        engine.persist();
      }
      Err(e) => {
        warn!(key = %engine.key, error = %e, "Error loading cart from storage, starting empty.");
        engine.persist();
      }
    }
    engine
  }

  fn restore(&self) -> VerdantResult<Option<Cart>> {
    let Some(raw) = self.storage.get(&self.key)? else {
      return Ok(None);
    };
    let cart = serde_json::from_str::<Cart>(&raw).map_err(VerdantError::from)?;
    Ok(Some(cart))
  }

  fn persist(&self) {
    let result = serde_json::to_string(&self.cart)
      .map_err(VerdantError::from)
      .and_then(|json| self.storage.set(&self.key, &json));
    if let Err(e) = result {
      warn!(key = %self.key, error = %e, "Failed to persist cart.");
    }
  }

  /// Applies one command and writes the new cart through to storage.
  pub fn dispatch(&mut self, command: CartCommand) {
    let name = command.name();
    self.cart = transition(&self.cart, command);
    debug!(
      command = name,
      lines = self.cart.items().len(),
      total = self.cart.total(),
      "Cart updated."
    );
    self.persist();
  }

  /// Adds `quantity` (default 1) of `plant`. Quantities are not validated.
  pub fn add_to_cart(&mut self, plant: Plant, quantity: Option<i32>) {
    let quantity = quantity.unwrap_or(DEFAULT_ADD_QUANTITY);
    self.dispatch(CartCommand::Add { plant, quantity });
  }

  pub fn remove_from_cart(&mut self, plant_id: &PlantId) {
    self.dispatch(CartCommand::Remove {
      plant_id: plant_id.clone(),
    });
  }

  /// Sets an absolute quantity; `quantity <= 0` removes the line.
  pub fn update_quantity(&mut self, plant_id: &PlantId, quantity: i32) {
    self.dispatch(CartCommand::SetQuantity {
      plant_id: plant_id.clone(),
      quantity,
    });
  }

  pub fn clear_cart(&mut self) {
    self.dispatch(CartCommand::Clear);
  }

  pub fn cart_items_count(&self) -> i64 {
    self.cart.items_count()
  }

  pub fn cart(&self) -> &Cart {
    &self.cart
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  pub fn key(&self) -> &str {
    &self.key
  }
}

impl<S: CartStorage> std::fmt::Debug for CartEngine<S> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("CartEngine")
      .field("key", &self.key)
      .field("cart", &self.cart)
      .finish_non_exhaustive()
  }
}
