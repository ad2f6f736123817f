// tests/race_tests.rs
mod common;

use common::*;
use diecast_cart::{
  CartSynchronizer, MemoryCartStore, RecordingNotifier, SessionAuth, SessionPhase, SyncConfig, SyncOutcome,
};
use serial_test::serial;
use std::sync::Arc;

struct GatedHarness {
  gate: Arc<GatedStore>,
  auth: Arc<SessionAuth>,
  sync: Arc<CartSynchronizer>,
}

async fn gated_harness() -> GatedHarness {
  let inner = Arc::new(MemoryCartStore::with_products(catalogue()));
  let gate = Arc::new(GatedStore::new(inner));
  let auth = Arc::new(SessionAuth::signed_in(ALICE));
  let sync = Arc::new(CartSynchronizer::new(
    gate.clone(),
    auth.clone(),
    Arc::new(RecordingNotifier::new()),
    SyncConfig::default(),
  ));
  sync.sync_session().await.unwrap();
  GatedHarness { gate, auth, sync }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn test_slow_older_fetch_cannot_clobber_newer_view() {
  setup_tracing();
  let h = gated_harness().await;
  h.sync.add_to_cart(SPEEDSTER, 1).await.unwrap();

  // Fetch A snapshots quantity 1 and parks.
  h.gate.hold_next_fetch();
  let slow_sync = h.sync.clone();
  let slow_fetch = tokio::spawn(async move { slow_sync.fetch().await });
  h.gate.reached.notified().await;
  assert!(h.sync.is_loading());

  // Meanwhile a merge bumps the line to 3 and its refetch lands first.
  h.sync.add_to_cart(SPEEDSTER, 2).await.unwrap();
  assert_eq!(h.sync.view().line_for(SPEEDSTER).map(|l| l.quantity), Some(3));
  let newest = h.sync.applied_ticket();

  h.gate.release.notify_one();
  let outcome = slow_fetch.await.unwrap().unwrap();

  assert_eq!(outcome, SyncOutcome::Discarded);
  assert_eq!(h.sync.view().line_for(SPEEDSTER).map(|l| l.quantity), Some(3));
  assert_eq!(h.sync.applied_ticket(), newest);
  assert!(!h.sync.is_loading());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn test_fetch_in_flight_across_sign_out_is_discarded() {
  setup_tracing();
  let h = gated_harness().await;
  h.sync.add_to_cart(SPEEDSTER, 2).await.unwrap();

  h.gate.hold_next_fetch();
  let slow_sync = h.sync.clone();
  let slow_fetch = tokio::spawn(async move { slow_sync.fetch().await });
  h.gate.reached.notified().await;

  h.auth.sign_out();
  h.sync.sync_session().await.unwrap();

  h.gate.release.notify_one();
  let outcome = slow_fetch.await.unwrap().unwrap();

  assert_eq!(outcome, SyncOutcome::Discarded);
  assert!(h.sync.view().is_empty());
  assert_eq!(h.sync.owner(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn test_distinct_lines_mutated_concurrently_both_persist() {
  setup_tracing();
  let h = gated_harness().await;
  h.sync.add_to_cart(SPEEDSTER, 1).await.unwrap();
  h.sync.add_to_cart(FLAME_RACER, 1).await.unwrap();

  let (a, b) = tokio::join!(
    h.sync.update_quantity(SPEEDSTER, 4),
    h.sync.update_quantity(FLAME_RACER, 6),
  );
  a.unwrap();
  b.unwrap();
  h.sync.fetch().await.unwrap();

  let view = h.sync.view();
  assert_eq!(view.line_for(SPEEDSTER).map(|l| l.quantity), Some(4));
  assert_eq!(view.line_for(FLAME_RACER).map(|l| l.quantity), Some(6));
  assert_eq!(h.gate.inner.line_count(ALICE), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
#[serial]
async fn test_phase_is_mutating_until_refetch_lands() {
  setup_tracing();
  let h = gated_harness().await;
  h.sync.add_to_cart(SPEEDSTER, 1).await.unwrap();
  assert_eq!(h.sync.phase(), SessionPhase::Loaded);
  assert!(!h.sync.is_loading());

  // The write goes through, then its refetch parks.
  h.gate.hold_next_fetch();
  let mutating_sync = h.sync.clone();
  let update = tokio::spawn(async move { mutating_sync.update_quantity(SPEEDSTER, 3).await });
  h.gate.reached.notified().await;

  assert_eq!(h.sync.phase(), SessionPhase::Mutating);
  assert!(h.sync.is_loading());
  assert_eq!(h.gate.inner.quantity_of(ALICE, SPEEDSTER), Some(3));
  // The view still shows the pre-mutation quantity.
  assert_eq!(h.sync.view().line_for(SPEEDSTER).map(|l| l.quantity), Some(1));

  h.gate.release.notify_one();
  update.await.unwrap().unwrap();

  assert_eq!(h.sync.phase(), SessionPhase::Loaded);
  assert!(!h.sync.is_loading());
  assert_eq!(h.sync.view().line_for(SPEEDSTER).map(|l| l.quantity), Some(3));
}
