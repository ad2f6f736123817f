// diecast_cart/src/sync/control.rs

//! Outcomes reported by the synchronizer and the per-session phase.

/// What a fetch did to the in-memory view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
  /// The fetched lines replaced the view.
  Applied,
  /// A newer fetch already landed, or the session changed while this one was
  /// in flight. The view was left untouched.
  Discarded,
  /// Nothing to do: no signed-in user, or the view already belongs to them.
  Skipped,
}

/// Where the current session sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
  Unauthenticated,
  /// Signed in, no fetch has landed yet.
  Empty,
  Loaded,
  /// At least one mutation is in flight.
  Mutating,
}
