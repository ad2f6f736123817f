// diecast_cart/src/model/cart_line.rs

use super::product::ProductSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One product entry in a user's cart, joined with the product it refers to.
///
/// The store keeps at most one line per `(user_id, product_id)` and never
/// persists a quantity below 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
  pub id: Uuid,
  pub user_id: Uuid,
  pub product_id: Uuid,
  pub quantity: i32,
  pub added_at: DateTime<Utc>,
  pub product: ProductSnapshot,
}

impl CartLine {
  /// Unit price times quantity, saturating at the `i64` bounds.
  pub fn line_total_cents(&self) -> i64 {
    self.product.price_cents.saturating_mul(i64::from(self.quantity))
  }

  /// Whether one more unit fits under the product's current stock.
  /// Lines that fail this stay in the cart; they only drop out of
  /// [`CartView::incrementable`](super::CartView::incrementable).
  pub fn can_increment(&self) -> bool {
    self.quantity < self.product.stock_quantity
  }
}

/// Insert payload for a line that does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartLine {
  pub user_id: Uuid,
  pub product_id: Uuid,
  pub quantity: i32,
}
