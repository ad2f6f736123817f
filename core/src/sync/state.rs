// diecast_cart/src/sync/state.rs

use crate::model::{CartLine, CartView};
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

/// Stamp taken when a fetch is issued. Tickets only grow, so a larger ticket
/// always belongs to a later request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

impl FetchTicket {
  pub fn value(&self) -> u64 {
    self.0
  }
}

#[derive(Debug, Default)]
pub(crate) struct TicketCounter(AtomicU64);

impl TicketCounter {
  pub(crate) fn issue(&self) -> FetchTicket {
    FetchTicket(self.0.fetch_add(1, Ordering::SeqCst) + 1)
  }
}

/// Everything the synchronizer keeps behind its lock.
///
/// Guards over this state are `parking_lot` guards and must be dropped
/// before any `.await`.
#[derive(Debug, Default)]
pub(crate) struct CartState {
  pub(crate) owner: Option<Uuid>,
  pub(crate) view: CartView,
  pub(crate) hydrated: bool,
  pub(crate) applied: FetchTicket,
}

impl CartState {
  /// Drops the view and hands it to `owner`. `barrier` must be freshly
  /// issued: any fetch stamped before it can no longer apply.
  pub(crate) fn reset(&mut self, owner: Option<Uuid>, barrier: FetchTicket) {
    self.owner = owner;
    self.view = CartView::default();
    self.hydrated = false;
    self.applied = barrier;
  }

  /// Replaces the view if the fetch is newer than the last one applied and
  /// was made for the current owner. Returns whether it applied.
  pub(crate) fn apply_fetch(&mut self, user_id: Uuid, ticket: FetchTicket, lines: Vec<CartLine>) -> bool {
    if self.owner != Some(user_id) || ticket <= self.applied {
      return false;
    }
    self.view = CartView::new(lines);
    self.applied = ticket;
    self.hydrated = true;
    true
  }
}
