// diecast_cart/src/memory_store.rs

//! An in-process `CartStore` with the same constraints as the hosted table:
//! one line per (user, product), quantity above zero, and a foreign key to
//! the product catalogue.

use crate::collab::store::CartStore;
use crate::error::{StoreError, StoreOperation};
use crate::model::{CartLine, NewCartLine, ProductSnapshot};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashMap;
use tracing::{event, Level};
use uuid::Uuid;

#[derive(Debug, Clone)]
struct StoredLine {
  id: Uuid,
  user_id: Uuid,
  product_id: Uuid,
  quantity: i32,
  added_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
enum Failure {
  Once(String),
  Always(String),
}

#[derive(Debug, Default)]
struct Inner {
  products: HashMap<Uuid, ProductSnapshot>,
  lines: Vec<StoredLine>,
  failures: HashMap<StoreOperation, Failure>,
  calls: Vec<StoreOperation>,
}

impl Inner {
  // Records the call and returns the injected failure, if one is armed.
  fn begin(&mut self, op: StoreOperation) -> Result<(), StoreError> {
    self.calls.push(op);
    match self.failures.get(&op).cloned() {
      None => Ok(()),
      Some(Failure::Always(message)) => Err(StoreError::Unavailable(message)),
      Some(Failure::Once(message)) => {
        self.failures.remove(&op);
        Err(StoreError::Unavailable(message))
      }
    }
  }
}

#[derive(Debug, Default)]
pub struct MemoryCartStore {
  inner: Mutex<Inner>,
}

impl MemoryCartStore {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_products(products: impl IntoIterator<Item = ProductSnapshot>) -> Self {
    let store = Self::new();
    for product in products {
      store.put_product(product);
    }
    store
  }

  /// Inserts or replaces a catalogue product.
  pub fn put_product(&self, product: ProductSnapshot) {
    self.inner.lock().products.insert(product.id, product);
  }

  pub fn set_stock(&self, product_id: Uuid, stock_quantity: i32) {
    if let Some(product) = self.inner.lock().products.get_mut(&product_id) {
      product.stock_quantity = stock_quantity;
    }
  }

  /// Makes the next call of `op` fail with `StoreError::Unavailable`.
  pub fn fail_next(&self, op: StoreOperation, message: impl Into<String>) {
    self.inner.lock().failures.insert(op, Failure::Once(message.into()));
  }

  /// Makes every call of `op` fail until [`heal`](Self::heal) is called.
  pub fn fail_always(&self, op: StoreOperation, message: impl Into<String>) {
    self.inner.lock().failures.insert(op, Failure::Always(message.into()));
  }

  pub fn heal(&self) {
    self.inner.lock().failures.clear();
  }

  /// Every operation issued against this store, in call order.
  pub fn calls(&self) -> Vec<StoreOperation> {
    self.inner.lock().calls.clone()
  }

  pub fn call_count(&self) -> usize {
    self.inner.lock().calls.len()
  }

  /// Number of persisted lines for `user_id`, bypassing call recording.
  pub fn line_count(&self, user_id: Uuid) -> usize {
    self.inner.lock().lines.iter().filter(|l| l.user_id == user_id).count()
  }

  /// Persisted quantity for a line, bypassing call recording.
  pub fn quantity_of(&self, user_id: Uuid, product_id: Uuid) -> Option<i32> {
    self
      .inner
      .lock()
      .lines
      .iter()
      .find(|l| l.user_id == user_id && l.product_id == product_id)
      .map(|l| l.quantity)
  }

  fn check_quantity(quantity: i32) -> Result<(), StoreError> {
    if quantity <= 0 {
      return Err(StoreError::Constraint(format!(
        "cart_items.quantity must be positive, got {}",
        quantity
      )));
    }
    Ok(())
  }
}

#[async_trait]
impl CartStore for MemoryCartStore {
  async fn fetch_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, StoreError> {
    let mut inner = self.inner.lock();
    inner.begin(StoreOperation::FetchLines)?;

    let mut joined = Vec::new();
    for line in inner.lines.iter().filter(|l| l.user_id == user_id) {
      match inner.products.get(&line.product_id) {
        Some(product) => joined.push(CartLine {
          id: line.id,
          user_id: line.user_id,
          product_id: line.product_id,
          quantity: line.quantity,
          added_at: line.added_at,
          product: product.clone(),
        }),
        None => {
          event!(Level::WARN, line_id = %line.id, product_id = %line.product_id, "Cart line references a missing product, skipping.");
        }
      }
    }
    Ok(joined)
  }

  async fn fetch_product(&self, product_id: Uuid) -> Result<Option<ProductSnapshot>, StoreError> {
    let mut inner = self.inner.lock();
    inner.begin(StoreOperation::FetchProduct)?;
    Ok(inner.products.get(&product_id).cloned())
  }

  async fn insert_line(&self, line: NewCartLine) -> Result<(), StoreError> {
    let mut inner = self.inner.lock();
    inner.begin(StoreOperation::InsertLine)?;
    Self::check_quantity(line.quantity)?;

    if !inner.products.contains_key(&line.product_id) {
      return Err(StoreError::UnknownProduct(line.product_id));
    }
    if inner
      .lines
      .iter()
      .any(|l| l.user_id == line.user_id && l.product_id == line.product_id)
    {
      return Err(StoreError::Conflict {
        user_id: line.user_id,
        product_id: line.product_id,
      });
    }

    inner.lines.push(StoredLine {
      id: Uuid::new_v4(),
      user_id: line.user_id,
      product_id: line.product_id,
      quantity: line.quantity,
      added_at: Utc::now(),
    });
    Ok(())
  }

  async fn update_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<u64, StoreError> {
    let mut inner = self.inner.lock();
    inner.begin(StoreOperation::UpdateQuantity)?;
    Self::check_quantity(quantity)?;

    let mut affected = 0;
    for line in inner
      .lines
      .iter_mut()
      .filter(|l| l.user_id == user_id && l.product_id == product_id)
    {
      line.quantity = quantity;
      affected += 1;
    }
    Ok(affected)
  }

  async fn delete_line(&self, user_id: Uuid, product_id: Uuid) -> Result<u64, StoreError> {
    let mut inner = self.inner.lock();
    inner.begin(StoreOperation::DeleteLine)?;
    let before = inner.lines.len();
    inner
      .lines
      .retain(|l| !(l.user_id == user_id && l.product_id == product_id));
    Ok((before - inner.lines.len()) as u64)
  }

  async fn delete_all(&self, user_id: Uuid) -> Result<u64, StoreError> {
    let mut inner = self.inner.lock();
    inner.begin(StoreOperation::DeleteAll)?;
    let before = inner.lines.len();
    inner.lines.retain(|l| l.user_id != user_id);
    Ok((before - inner.lines.len()) as u64)
  }
}
