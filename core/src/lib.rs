// diecast_cart/src/lib.rs

//! diecast_cart: the shopping cart behind the die-cast storefront.
//!
//! A [`CartSynchronizer`] owns the in-memory view of one signed-in user's
//! cart and routes every change through a remote [`CartStore`]:
//!  - Add, update, remove and clear go to the store, then refetch.
//!  - Duplicate adds merge into the existing line.
//!  - Quantities at or below zero remove the line.
//!  - Fetch results are ticketed so a slow, older fetch never overwrites a
//!    newer one.
//!  - Failures become user-facing notices through a [`Notifier`]; nothing is
//!    retried.
//!
//! The store, the auth session and the notifier are injected at
//! construction, so tests run against [`MemoryCartStore`] and
//! [`RecordingNotifier`].

pub mod collab;
pub mod config;
pub mod error;
pub mod memory_store;
pub mod model;
pub mod sync;

// --- Re-exports for the Public API ---

pub use crate::collab::{
  AuthProvider, CartStore, Notice, NoticeKind, Notifier, RecordingNotifier, SessionAuth, Severity, TracingNotifier,
};
pub use crate::config::{ParseStockPolicyError, StockPolicy, SyncConfig};
pub use crate::error::{CartError, CartResult, StoreError, StoreOperation};
pub use crate::memory_store::MemoryCartStore;
pub use crate::model::{CartLine, CartView, CheckoutSummary, NewCartLine, ProductSnapshot};
pub use crate::sync::{CartSynchronizer, FetchTicket, SessionPhase, SyncOutcome};

/*
    Typical wiring:
    1. Build a store (`MemoryCartStore`, or a database-backed `CartStore`).
    2. Share one `SessionAuth` between the sign-in flow and the synchronizer.
    3. `CartSynchronizer::new(store, auth, notifier, SyncConfig::default())`,
       wrapped in an `Arc` if several components need it.
    4. Call `sync_session().await` whenever sign-in state changes.
    5. Drive `add_to_cart` / `update_quantity` / `remove_from_cart` /
       `clear_cart` from UI events and re-read `lines()`, `total_amount()`,
       `total_items()` and `is_loading()` afterwards.
*/
