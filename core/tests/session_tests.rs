// tests/session_tests.rs
mod common;

use common::*;
use diecast_cart::{CartError, NoticeKind, SessionPhase, SyncConfig, SyncOutcome};
use serial_test::serial;

#[tokio::test]
#[serial]
async fn test_mutations_without_user_make_no_store_calls() {
  setup_tracing();
  let h = Harness::new(SyncConfig::default());

  let results = vec![
    h.sync.add_to_cart(SPEEDSTER, 1).await,
    h.sync.update_quantity(SPEEDSTER, 2).await,
    h.sync.remove_from_cart(SPEEDSTER).await,
    h.sync.clear_cart().await,
  ];

  for result in results {
    assert!(matches!(result, Err(CartError::NotAuthenticated { .. })));
  }
  assert_eq!(h.store.call_count(), 0);
  assert!(h.sync.view().is_empty());
  assert_eq!(h.sync.phase(), SessionPhase::Unauthenticated);
  assert_eq!(h.notices.kinds(), vec![NoticeKind::SignInRequired; 4]);
}

#[tokio::test]
#[serial]
async fn test_fetch_without_user_is_skipped() {
  setup_tracing();
  let h = Harness::new(SyncConfig::default());

  let outcome = h.sync.fetch().await.unwrap();

  assert_eq!(outcome, SyncOutcome::Skipped);
  assert_eq!(h.store.call_count(), 0);
  assert!(h.notices.notices().is_empty());
}

#[tokio::test]
#[serial]
async fn test_sign_in_rehydrates_existing_cart() {
  setup_tracing();
  let h = Harness::signed_in(SyncConfig::default(), ALICE).await;
  h.sync.add_to_cart(SPEEDSTER, 2).await.unwrap();

  // A fresh synchronizer over the same store, as after a page reload.
  let reloaded = Harness::with_store(h.store.clone(), SyncConfig::default());
  assert_eq!(reloaded.sync.phase(), SessionPhase::Unauthenticated);
  reloaded.auth.sign_in(ALICE);

  let outcome = reloaded.sync.sync_session().await.unwrap();

  assert_eq!(outcome, SyncOutcome::Applied);
  assert_eq!(reloaded.sync.phase(), SessionPhase::Loaded);
  assert_eq!(reloaded.quantity_in_view(SPEEDSTER), Some(2));
}

#[tokio::test]
#[serial]
async fn test_sync_session_is_idempotent_for_same_user() {
  setup_tracing();
  let h = Harness::signed_in(SyncConfig::default(), ALICE).await;
  let calls_before = h.store.call_count();

  let outcome = h.sync.sync_session().await.unwrap();

  assert_eq!(outcome, SyncOutcome::Skipped);
  assert_eq!(h.store.call_count(), calls_before);
}

#[tokio::test]
#[serial]
async fn test_sign_out_discards_view_but_keeps_remote_rows() {
  setup_tracing();
  let h = Harness::signed_in(SyncConfig::default(), ALICE).await;
  h.sync.add_to_cart(SPEEDSTER, 2).await.unwrap();

  h.auth.sign_out();
  h.sync.sync_session().await.unwrap();

  assert!(h.sync.view().is_empty());
  assert_eq!(h.sync.owner(), None);
  assert_eq!(h.sync.phase(), SessionPhase::Unauthenticated);
  assert_eq!(h.store.quantity_of(ALICE, SPEEDSTER), Some(2));
}

#[tokio::test]
#[serial]
async fn test_user_switch_loads_new_cart_before_merging() {
  setup_tracing();
  let h = Harness::signed_in(SyncConfig::default(), BOB).await;
  h.sync.add_to_cart(SPEEDSTER, 1).await.unwrap();
  h.auth.sign_in(ALICE);
  h.sync.sync_session().await.unwrap();
  h.sync.add_to_cart(SPEEDSTER, 1).await.unwrap();

  // Back to Bob without an explicit sync_session: the mutation notices the
  // new owner, loads Bob's cart, and merges instead of inserting twice.
  h.auth.sign_in(BOB);
  h.sync.add_to_cart(SPEEDSTER, 2).await.unwrap();

  assert_eq!(h.sync.owner(), Some(BOB));
  assert_eq!(h.quantity_in_view(SPEEDSTER), Some(3));
  assert_eq!(h.store.quantity_of(BOB, SPEEDSTER), Some(3));
  assert_eq!(h.store.quantity_of(ALICE, SPEEDSTER), Some(1));
  assert!(h.notices.errors().is_empty());
}

#[tokio::test]
#[serial]
async fn test_mutation_after_sign_out_discards_stale_view() {
  setup_tracing();
  let h = Harness::signed_in(SyncConfig::default(), ALICE).await;
  h.sync.add_to_cart(SPEEDSTER, 1).await.unwrap();
  h.auth.sign_out();
  let calls_before = h.store.call_count();

  let err = h.sync.remove_from_cart(SPEEDSTER).await.unwrap_err();

  assert!(matches!(err, CartError::NotAuthenticated { .. }));
  assert_eq!(h.store.call_count(), calls_before);
  assert!(h.sync.view().is_empty());
}

#[tokio::test]
#[serial]
async fn test_checkout_requires_sign_in() {
  setup_tracing();
  let h = Harness::new(SyncConfig::default());

  let err = h.sync.checkout_summary().unwrap_err();

  assert!(matches!(err, CartError::NotAuthenticated { .. }));
  assert_eq!(h.notices.kinds(), vec![NoticeKind::SignInRequired]);
}
