// storefront/src/errors.rs

use diecast_cart::{CartError, ParseStockPolicyError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Cart Error: {0}")]
  Cart(#[from] CartError),

  #[error("Serialization Error: {0}")]
  Json(#[from] serde_json::Error),
}

impl From<ParseStockPolicyError> for AppError {
  fn from(err: ParseStockPolicyError) -> Self {
    AppError::Config(err.to_string())
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
