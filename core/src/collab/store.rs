// diecast_cart/src/collab/store.rs

//! Defines the `CartStore` trait the synchronizer persists through.

use crate::error::StoreError;
use crate::model::{CartLine, NewCartLine, ProductSnapshot};
use async_trait::async_trait;
use uuid::Uuid;

/// Row-level CRUD over the cart table, keyed by `(user_id, product_id)`.
///
/// Implementations own the wire protocol. Counts returned by the mutating
/// calls are rows affected, so `0` means the filter matched nothing.
#[async_trait]
pub trait CartStore: Send + Sync {
  /// All lines belonging to `user_id`, each joined with its product.
  async fn fetch_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, StoreError>;

  /// Current snapshot of one product, or `None` if it does not exist.
  async fn fetch_product(&self, product_id: Uuid) -> Result<Option<ProductSnapshot>, StoreError>;

  /// Inserts a line. Must fail with `StoreError::Conflict` if the pair exists.
  async fn insert_line(&self, line: NewCartLine) -> Result<(), StoreError>;

  async fn update_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<u64, StoreError>;

  async fn delete_line(&self, user_id: Uuid, product_id: Uuid) -> Result<u64, StoreError>;

  async fn delete_all(&self, user_id: Uuid) -> Result<u64, StoreError>;
}
