// diecast_cart/src/error.rs
use anyhow::Error as AnyhowError;
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// The remote store call a failure came from. Used for log fields and to
/// pick the notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOperation {
  FetchLines,
  FetchProduct,
  InsertLine,
  UpdateQuantity,
  DeleteLine,
  DeleteAll,
}

impl fmt::Display for StoreOperation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      StoreOperation::FetchLines => "fetch_lines",
      StoreOperation::FetchProduct => "fetch_product",
      StoreOperation::InsertLine => "insert_line",
      StoreOperation::UpdateQuantity => "update_quantity",
      StoreOperation::DeleteLine => "delete_line",
      StoreOperation::DeleteAll => "delete_all",
    };
    f.write_str(name)
  }
}

/// Failures reported by a `CartStore` implementation.
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Store unavailable: {0}")]
  Unavailable(String),

  #[error("Permission denied: {0}")]
  Permission(String),

  #[error("Cart line for user {user_id} and product {product_id} already exists")]
  Conflict { user_id: Uuid, product_id: Uuid },

  #[error("Constraint violated: {0}")]
  Constraint(String),

  #[error("Unknown product: {0}")]
  UnknownProduct(Uuid),

  #[error("Store backend error. Source: {source}")]
  Backend {
    #[source]
    source: AnyhowError,
  },
}

// Adapters that use `anyhow::Context` can bubble their errors up with `?`.
impl From<AnyhowError> for StoreError {
  fn from(err: AnyhowError) -> Self {
    StoreError::Backend { source: err }
  }
}

#[derive(Debug, Error)]
pub enum CartError {
  #[error("Sign-in required to {action}")]
  NotAuthenticated { action: &'static str },

  #[error("Cart store operation '{operation}' failed. Source: {source}")]
  Store {
    operation: StoreOperation,
    #[source]
    source: StoreError,
  },

  #[error("Invalid quantity {quantity} for product {product_id}")]
  InvalidQuantity { product_id: Uuid, quantity: i32 },

  #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
  InsufficientStock {
    product_id: Uuid,
    requested: i32,
    available: i32,
  },

  #[error("Product not found: {product_id}")]
  ProductNotFound { product_id: Uuid },

  #[error("Cart is empty")]
  EmptyCart,
}

impl CartError {
  pub(crate) fn store(operation: StoreOperation, source: StoreError) -> Self {
    CartError::Store { operation, source }
  }
}

pub type CartResult<T, E = CartError> = std::result::Result<T, E>;
