// diecast_cart/src/collab/auth.rs

use parking_lot::RwLock;
use tracing::{event, Level};
use uuid::Uuid;

/// Exposes the identity of the signed-in user, if any.
pub trait AuthProvider: Send + Sync {
  fn current_user(&self) -> Option<Uuid>;
}

/// A sign-in slot held in memory. The storefront's auth layer writes it,
/// the synchronizer reads it.
#[derive(Debug, Default)]
pub struct SessionAuth {
  user: RwLock<Option<Uuid>>,
}

impl SessionAuth {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn signed_in(user_id: Uuid) -> Self {
    Self {
      user: RwLock::new(Some(user_id)),
    }
  }

  pub fn sign_in(&self, user_id: Uuid) {
    event!(Level::INFO, %user_id, "User signed in.");
    *self.user.write() = Some(user_id);
  }

  pub fn sign_out(&self) {
    if let Some(user_id) = self.user.write().take() {
      event!(Level::INFO, %user_id, "User signed out.");
    }
  }
}

impl AuthProvider for SessionAuth {
  fn current_user(&self) -> Option<Uuid> {
    *self.user.read()
  }
}
