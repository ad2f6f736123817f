// diecast_cart/src/sync/activity.rs

//! The shared loading flag, kept as in-flight counters so overlapping calls
//! do not clear it for each other.

use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ActivityKind {
  Fetch,
  Mutation,
}

#[derive(Debug, Default)]
pub(crate) struct Activity {
  in_flight: AtomicUsize,
  mutating: AtomicUsize,
}

impl Activity {
  pub(crate) fn begin(&self, kind: ActivityKind) -> ActivityGuard<'_> {
    self.in_flight.fetch_add(1, Ordering::SeqCst);
    if kind == ActivityKind::Mutation {
      self.mutating.fetch_add(1, Ordering::SeqCst);
    }
    ActivityGuard { activity: self, kind }
  }

  pub(crate) fn is_busy(&self) -> bool {
    self.in_flight.load(Ordering::SeqCst) > 0
  }

  pub(crate) fn is_mutating(&self) -> bool {
    self.mutating.load(Ordering::SeqCst) > 0
  }
}

pub(crate) struct ActivityGuard<'a> {
  activity: &'a Activity,
  kind: ActivityKind,
}

impl Drop for ActivityGuard<'_> {
  fn drop(&mut self) {
    if self.kind == ActivityKind::Mutation {
      self.activity.mutating.fetch_sub(1, Ordering::SeqCst);
    }
    self.activity.in_flight.fetch_sub(1, Ordering::SeqCst);
  }
}
