// diecast_cart/src/config.rs

use std::str::FromStr;
use thiserror::Error;

/// Whether the synchronizer checks requested quantities against stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StockPolicy {
  /// Callers clamp to stock before calling; quantities are persisted as given.
  #[default]
  Permissive,
  /// The product's current stock is read from the store before every insert
  /// or quantity change, and anything above it is rejected.
  Enforce,
}

#[derive(Debug, Error)]
#[error("Unknown stock policy '{0}', expected 'permissive' or 'enforce'")]
pub struct ParseStockPolicyError(String);

impl FromStr for StockPolicy {
  type Err = ParseStockPolicyError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "permissive" => Ok(StockPolicy::Permissive),
      "enforce" => Ok(StockPolicy::Enforce),
      other => Err(ParseStockPolicyError(other.to_string())),
    }
  }
}

#[derive(Debug, Clone)]
pub struct SyncConfig {
  pub stock_policy: StockPolicy,
  /// Raise info notices ("Added to cart", "Removed from cart") on success.
  /// Error notices are always raised.
  pub success_notices: bool,
}

impl Default for SyncConfig {
  fn default() -> Self {
    Self {
      stock_policy: StockPolicy::Permissive,
      success_notices: true,
    }
  }
}

impl SyncConfig {
  pub fn with_stock_policy(mut self, stock_policy: StockPolicy) -> Self {
    self.stock_policy = stock_policy;
    self
  }

  pub fn with_success_notices(mut self, enabled: bool) -> Self {
    self.success_notices = enabled;
    self
  }
}
