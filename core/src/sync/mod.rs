// diecast_cart/src/sync/mod.rs

//! The cart synchronizer and the state it guards.

mod activity;
pub mod control;
mod state;
pub mod synchronizer;

pub use control::{SessionPhase, SyncOutcome};
pub use state::FetchTicket;
pub use synchronizer::CartSynchronizer;
