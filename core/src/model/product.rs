// diecast_cart/src/model/product.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The slice of a catalogue product that is joined onto every cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
  pub id: Uuid,
  pub name: String,
  pub price_cents: i64, // Unit price in minor currency units
  pub image_url: Option<String>,
  pub stock_quantity: i32,
}

impl ProductSnapshot {
  pub fn new(id: Uuid, name: impl Into<String>, price_cents: i64, stock_quantity: i32) -> Self {
    Self {
      id,
      name: name.into(),
      price_cents,
      image_url: None,
      stock_quantity,
    }
  }

  pub fn with_image(mut self, image_url: impl Into<String>) -> Self {
    self.image_url = Some(image_url.into());
    self
  }

  pub fn in_stock(&self) -> bool {
    self.stock_quantity > 0
  }
}
