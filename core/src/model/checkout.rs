// diecast_cart/src/model/checkout.rs

use super::cart_line::CartLine;
use super::view::CartView;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// What a payment integration would be handed when the user proceeds to
/// checkout. Building one has no side effects on the cart.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSummary {
  pub user_id: Uuid,
  pub lines: Vec<CartLine>,
  pub total_items: i64,
  pub total_amount_cents: i64,
  pub prepared_at: DateTime<Utc>,
}

impl CheckoutSummary {
  pub(crate) fn from_view(user_id: Uuid, view: &CartView) -> Self {
    Self {
      user_id,
      lines: view.lines().to_vec(),
      total_items: view.total_items(),
      total_amount_cents: view.total_amount_cents(),
      prepared_at: Utc::now(),
    }
  }
}
