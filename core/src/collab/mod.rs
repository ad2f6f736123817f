// diecast_cart/src/collab/mod.rs

//! Collaborators the synchronizer is constructed with: the remote store,
//! the auth session and the notification sink.

pub mod auth;
pub mod notify;
pub mod store;

pub use auth::{AuthProvider, SessionAuth};
pub use notify::{Notice, NoticeKind, Notifier, RecordingNotifier, Severity, TracingNotifier};
pub use store::CartStore;
