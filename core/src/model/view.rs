// diecast_cart/src/model/view.rs

use super::cart_line::CartLine;
use serde::Serialize;
use uuid::Uuid;

/// In-memory copy of one user's cart, in store fetch order.
///
/// Totals are folded on demand and never cached.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartView {
  lines: Vec<CartLine>,
}

impl CartView {
  pub fn new(lines: Vec<CartLine>) -> Self {
    Self { lines }
  }

  pub fn lines(&self) -> &[CartLine] {
    &self.lines
  }

  pub fn into_lines(self) -> Vec<CartLine> {
    self.lines
  }

  pub fn len(&self) -> usize {
    self.lines.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lines.is_empty()
  }

  pub fn line_for(&self, product_id: Uuid) -> Option<&CartLine> {
    self.lines.iter().find(|line| line.product_id == product_id)
  }

  /// Sum of quantities over all lines.
  pub fn total_items(&self) -> i64 {
    self
      .lines
      .iter()
      .fold(0i64, |total, line| total.saturating_add(i64::from(line.quantity)))
  }

  /// Sum of `unit price * quantity` over all lines, in minor units.
  /// Saturates instead of overflowing.
  pub fn total_amount_cents(&self) -> i64 {
    self
      .lines
      .iter()
      .fold(0i64, |total, line| total.saturating_add(line.line_total_cents()))
  }

  /// Lines whose quantity can still be raised by one without passing stock.
  pub fn incrementable(&self) -> impl Iterator<Item = &CartLine> {
    self.lines.iter().filter(|line| line.can_increment())
  }
}
