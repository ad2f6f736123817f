// diecast_cart/src/collab/notify.rs

//! User-facing notifications raised by the synchronizer.

use parking_lot::Mutex;
use tracing::{event, Level};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
  Info,
  Error,
}

/// What happened. Each kind maps to a fixed severity, title and message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
  SignInRequired,
  LoadFailed,
  AddFailed,
  RemoveFailed,
  UpdateFailed,
  ClearFailed,
  InsufficientStock { available: i32 },
  Added,
  Removed,
}

impl NoticeKind {
  pub fn severity(&self) -> Severity {
    match self {
      NoticeKind::Added | NoticeKind::Removed => Severity::Info,
      _ => Severity::Error,
    }
  }

  pub fn title(&self) -> &'static str {
    match self {
      NoticeKind::SignInRequired => "Please sign in",
      NoticeKind::InsufficientStock { .. } => "Not enough stock",
      NoticeKind::Added => "Added to cart",
      NoticeKind::Removed => "Removed from cart",
      _ => "Error",
    }
  }

  pub fn description(&self) -> String {
    match self {
      NoticeKind::SignInRequired => "You need to be signed in to use the cart".to_string(),
      NoticeKind::LoadFailed => "Failed to load cart items".to_string(),
      NoticeKind::AddFailed => "Failed to add item to cart".to_string(),
      NoticeKind::RemoveFailed => "Failed to remove item from cart".to_string(),
      NoticeKind::UpdateFailed => "Failed to update quantity".to_string(),
      NoticeKind::ClearFailed => "Failed to clear cart".to_string(),
      NoticeKind::InsufficientStock { available } => format!("Only {} available", available),
      NoticeKind::Added => "Item has been added to your cart".to_string(),
      NoticeKind::Removed => "Item has been removed from your cart".to_string(),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
  pub kind: NoticeKind,
  pub severity: Severity,
  pub title: &'static str,
  pub description: String,
}

impl From<NoticeKind> for Notice {
  fn from(kind: NoticeKind) -> Self {
    Notice {
      kind,
      severity: kind.severity(),
      title: kind.title(),
      description: kind.description(),
    }
  }
}

/// Displays a message to the user. Implementations must not block.
pub trait Notifier: Send + Sync {
  fn notify(&self, notice: Notice);
}

/// Writes notices to the log. Used when no UI is attached.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
  fn notify(&self, notice: Notice) {
    match notice.severity {
      Severity::Info => event!(Level::INFO, title = notice.title, "{}", notice.description),
      Severity::Error => event!(Level::WARN, title = notice.title, "{}", notice.description),
    }
  }
}

/// Keeps every notice in order so callers can inspect them afterwards.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
  notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn notices(&self) -> Vec<Notice> {
    self.notices.lock().clone()
  }

  pub fn kinds(&self) -> Vec<NoticeKind> {
    self.notices.lock().iter().map(|n| n.kind).collect()
  }

  pub fn errors(&self) -> Vec<Notice> {
    self
      .notices
      .lock()
      .iter()
      .filter(|n| n.severity == Severity::Error)
      .cloned()
      .collect()
  }

  pub fn clear(&self) {
    self.notices.lock().clear();
  }
}

impl Notifier for RecordingNotifier {
  fn notify(&self, notice: Notice) {
    self.notices.lock().push(notice);
  }
}
