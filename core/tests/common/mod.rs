// tests/common/mod.rs
#![allow(dead_code)] // Not every test binary uses every fixture

use async_trait::async_trait;
use diecast_cart::{
  CartLine, CartStore, CartSynchronizer, MemoryCartStore, NewCartLine, ProductSnapshot, RecordingNotifier,
  SessionAuth, StoreError, SyncConfig,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use tracing::Level;
use uuid::Uuid;

// --- Catalogue fixtures ---
pub const SPEEDSTER: Uuid = Uuid::from_u128(0x1001);
pub const FLAME_RACER: Uuid = Uuid::from_u128(0x1002);
pub const THUNDER_MUSCLE: Uuid = Uuid::from_u128(0x1003);
pub const MONSTER_TRUCK: Uuid = Uuid::from_u128(0x1004);
pub const UNLISTED: Uuid = Uuid::from_u128(0x1999);

pub const ALICE: Uuid = Uuid::from_u128(0xA11CE);
pub const BOB: Uuid = Uuid::from_u128(0xB0B);

pub fn catalogue() -> Vec<ProductSnapshot> {
  vec![
    ProductSnapshot::new(SPEEDSTER, "Red Lightning Speedster", 179, 25).with_image("red-speedster.jpg"),
    ProductSnapshot::new(FLAME_RACER, "Blue Flame Racer", 299, 18).with_image("blue-racer.jpg"),
    ProductSnapshot::new(THUNDER_MUSCLE, "Yellow Thunder Muscle", 499, 5).with_image("yellow-muscle.jpg"),
    ProductSnapshot::new(MONSTER_TRUCK, "Green Monster Truck", 299, 2).with_image("green-monster.jpg"),
  ]
}

/// A synchronizer wired to in-memory collaborators, with handles kept for
/// assertions.
pub struct Harness {
  pub store: Arc<MemoryCartStore>,
  pub auth: Arc<SessionAuth>,
  pub notices: Arc<RecordingNotifier>,
  pub sync: Arc<CartSynchronizer>,
}

impl Harness {
  pub fn new(config: SyncConfig) -> Self {
    let store = Arc::new(MemoryCartStore::with_products(catalogue()));
    Self::with_store(store, config)
  }

  pub fn with_store(store: Arc<MemoryCartStore>, config: SyncConfig) -> Self {
    let auth = Arc::new(SessionAuth::new());
    let notices = Arc::new(RecordingNotifier::new());
    let sync = Arc::new(CartSynchronizer::new(
      store.clone(),
      auth.clone(),
      notices.clone(),
      config,
    ));
    Self {
      store,
      auth,
      notices,
      sync,
    }
  }

  /// Signs `user_id` in and loads their cart.
  pub async fn signed_in(config: SyncConfig, user_id: Uuid) -> Self {
    let harness = Self::new(config);
    harness.auth.sign_in(user_id);
    harness.sync.sync_session().await.unwrap();
    harness
  }

  pub fn quantity_in_view(&self, product_id: Uuid) -> Option<i32> {
    self.sync.view().line_for(product_id).map(|l| l.quantity)
  }
}

/// Wraps a `MemoryCartStore` and can hold one `fetch_lines` call after it
/// has read the store, until the test releases it.
pub struct GatedStore {
  pub inner: Arc<MemoryCartStore>,
  armed: AtomicBool,
  pub reached: Notify,
  pub release: Notify,
}

impl GatedStore {
  pub fn new(inner: Arc<MemoryCartStore>) -> Self {
    Self {
      inner,
      armed: AtomicBool::new(false),
      reached: Notify::new(),
      release: Notify::new(),
    }
  }

  /// The next `fetch_lines` snapshots the store, then parks.
  pub fn hold_next_fetch(&self) {
    self.armed.store(true, Ordering::SeqCst);
  }
}

#[async_trait]
impl CartStore for GatedStore {
  async fn fetch_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, StoreError> {
    let lines = self.inner.fetch_lines(user_id).await?;
    if self.armed.swap(false, Ordering::SeqCst) {
      self.reached.notify_one();
      self.release.notified().await;
    }
    Ok(lines)
  }

  async fn fetch_product(&self, product_id: Uuid) -> Result<Option<ProductSnapshot>, StoreError> {
    self.inner.fetch_product(product_id).await
  }

  async fn insert_line(&self, line: NewCartLine) -> Result<(), StoreError> {
    self.inner.insert_line(line).await
  }

  async fn update_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<u64, StoreError> {
    self.inner.update_quantity(user_id, product_id, quantity).await
  }

  async fn delete_line(&self, user_id: Uuid, product_id: Uuid) -> Result<u64, StoreError> {
    self.inner.delete_line(user_id, product_id).await
  }

  async fn delete_all(&self, user_id: Uuid) -> Result<u64, StoreError> {
    self.inner.delete_all(user_id).await
  }
}

// --- Helper for Tracing Setup (call once per test run if needed) ---
use once_cell::sync::Lazy;
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}
