// diecast_cart/src/sync/synchronizer.rs

//! `CartSynchronizer`: the single owner of a signed-in user's cart view.
//!
//! Every mutation goes to the store first and then refetches, whether or not
//! the mutation succeeded, so the view never drifts from the store for
//! longer than one round trip. Fetch results are stamped with a
//! [`FetchTicket`] and only the newest one is allowed to land.

use crate::collab::{AuthProvider, CartStore, Notice, NoticeKind, Notifier};
use crate::config::{StockPolicy, SyncConfig};
use crate::error::{CartError, CartResult, StoreOperation};
use crate::model::{CartLine, CartView, CheckoutSummary, NewCartLine};
use crate::sync::activity::{Activity, ActivityKind};
use crate::sync::control::{SessionPhase, SyncOutcome};
use crate::sync::state::{CartState, FetchTicket, TicketCounter};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{event, instrument, Level};
use uuid::Uuid;

pub struct CartSynchronizer {
  store: Arc<dyn CartStore>,
  auth: Arc<dyn AuthProvider>,
  notifier: Arc<dyn Notifier>,
  config: SyncConfig,
  state: RwLock<CartState>,
  tickets: TicketCounter,
  activity: Activity,
}

impl CartSynchronizer {
  pub fn new(
    store: Arc<dyn CartStore>,
    auth: Arc<dyn AuthProvider>,
    notifier: Arc<dyn Notifier>,
    config: SyncConfig,
  ) -> Self {
    Self {
      store,
      auth,
      notifier,
      config,
      state: RwLock::new(CartState::default()),
      tickets: TicketCounter::default(),
      activity: Activity::default(),
    }
  }

  pub fn config(&self) -> &SyncConfig {
    &self.config
  }

  // --- Read side (never touches the store) ---

  pub fn view(&self) -> CartView {
    self.state.read().view.clone()
  }

  pub fn lines(&self) -> Vec<CartLine> {
    self.state.read().view.lines().to_vec()
  }

  /// Sum of `unit price * quantity`, in minor units.
  pub fn total_amount(&self) -> i64 {
    self.state.read().view.total_amount_cents()
  }

  pub fn total_items(&self) -> i64 {
    self.state.read().view.total_items()
  }

  /// True while any fetch or mutation is in flight.
  pub fn is_loading(&self) -> bool {
    self.activity.is_busy()
  }

  /// The user the current view belongs to.
  pub fn owner(&self) -> Option<Uuid> {
    self.state.read().owner
  }

  /// Last fetch ticket that replaced the view.
  pub fn applied_ticket(&self) -> FetchTicket {
    self.state.read().applied
  }

  pub fn phase(&self) -> SessionPhase {
    let guard = self.state.read();
    if guard.owner.is_none() {
      SessionPhase::Unauthenticated
    } else if self.activity.is_mutating() {
      SessionPhase::Mutating
    } else if guard.hydrated {
      SessionPhase::Loaded
    } else {
      SessionPhase::Empty
    }
  }

  // --- Session ---

  /// Brings the view in line with the auth collaborator. A new user gets a
  /// rehydrating fetch; no user discards the view. Remote rows are never
  /// touched here.
  #[instrument(name = "CartSynchronizer::sync_session", skip(self), err(Display))]
  pub async fn sync_session(&self) -> CartResult<SyncOutcome> {
    match self.auth.current_user() {
      None => {
        self.end_session();
        Ok(SyncOutcome::Skipped)
      }
      Some(user_id) if self.owner() == Some(user_id) => {
        event!(Level::TRACE, %user_id, "Session unchanged.");
        Ok(SyncOutcome::Skipped)
      }
      Some(user_id) => {
        self.begin_session(user_id);
        self.refresh(user_id).await
      }
    }
  }

  fn begin_session(&self, user_id: Uuid) {
    let barrier = self.tickets.issue();
    self.state.write().reset(Some(user_id), barrier);
    event!(Level::INFO, %user_id, "Cart session started.");
  }

  fn end_session(&self) {
    let barrier = self.tickets.issue();
    let previous = {
      let mut guard = self.state.write();
      let previous = guard.owner;
      guard.reset(None, barrier);
      previous
    };
    if let Some(user_id) = previous {
      event!(Level::INFO, %user_id, "Cart session ended, view discarded.");
    }
  }

  // --- Fetch ---

  /// Reloads every line for the signed-in user and replaces the view.
  ///
  /// On failure the previous view is kept as-is and a load-failure notice is
  /// raised.
  #[instrument(name = "CartSynchronizer::fetch", skip(self), err(Display))]
  pub async fn fetch(&self) -> CartResult<SyncOutcome> {
    let Some(user_id) = self.auth.current_user() else {
      event!(Level::DEBUG, "No signed-in user, fetch skipped.");
      self.end_session();
      return Ok(SyncOutcome::Skipped);
    };
    if self.owner() != Some(user_id) {
      self.begin_session(user_id);
    }
    self.refresh(user_id).await
  }

  async fn refresh(&self, user_id: Uuid) -> CartResult<SyncOutcome> {
    let _busy = self.activity.begin(ActivityKind::Fetch);
    let ticket = self.tickets.issue();
    event!(Level::DEBUG, %user_id, ticket = ticket.value(), "Fetching cart lines.");

    match self.store.fetch_lines(user_id).await {
      Ok(lines) => {
        let count = lines.len();
        if self.state.write().apply_fetch(user_id, ticket, lines) {
          event!(Level::DEBUG, ticket = ticket.value(), lines = count, "Cart view replaced.");
          Ok(SyncOutcome::Applied)
        } else {
          event!(Level::DEBUG, ticket = ticket.value(), "Stale fetch result discarded.");
          Ok(SyncOutcome::Discarded)
        }
      }
      Err(source) => {
        event!(Level::ERROR, %user_id, error = %source, "Failed to load cart lines.");
        self.notify(NoticeKind::LoadFailed);
        Err(CartError::store(StoreOperation::FetchLines, source))
      }
    }
  }

  // --- Mutations ---

  /// Adds `quantity` units of a product. A product already in the view is
  /// merged into its existing line through [`update_quantity`](Self::update_quantity).
  #[instrument(name = "CartSynchronizer::add_to_cart", skip(self), err(Display))]
  pub async fn add_to_cart(&self, product_id: Uuid, quantity: i32) -> CartResult<()> {
    let user_id = self.require_user("add items to the cart").await?;

    let existing = self.state.read().view.line_for(product_id).map(|line| line.quantity);
    if let Some(current) = existing {
      event!(Level::DEBUG, current, "Product already in cart, merging quantities.");
      return self.update_quantity(product_id, current.saturating_add(quantity)).await;
    }

    if quantity <= 0 {
      event!(Level::WARN, "Rejected non-positive quantity for a new cart line.");
      self.notify(NoticeKind::AddFailed);
      return Err(CartError::InvalidQuantity { product_id, quantity });
    }

    let _busy = self.activity.begin(ActivityKind::Mutation);
    let result = self.insert_line(user_id, product_id, quantity).await;
    self
      .finish_mutation(user_id, result, NoticeKind::AddFailed, Some(NoticeKind::Added))
      .await
  }

  /// Sets the quantity of an existing line. Zero or less removes the line.
  #[instrument(name = "CartSynchronizer::update_quantity", skip(self), err(Display))]
  pub async fn update_quantity(&self, product_id: Uuid, quantity: i32) -> CartResult<()> {
    let user_id = self.require_user("change cart quantities").await?;

    if quantity <= 0 {
      event!(Level::DEBUG, "Quantity dropped to zero, removing line.");
      return self.remove_from_cart(product_id).await;
    }

    let _busy = self.activity.begin(ActivityKind::Mutation);
    let result = self.write_quantity(user_id, product_id, quantity).await;
    self
      .finish_mutation(user_id, result, NoticeKind::UpdateFailed, None)
      .await
  }

  /// Deletes the line for a product. Removing an absent line is not an error.
  #[instrument(name = "CartSynchronizer::remove_from_cart", skip(self), err(Display))]
  pub async fn remove_from_cart(&self, product_id: Uuid) -> CartResult<()> {
    let user_id = self.require_user("remove items from the cart").await?;

    let _busy = self.activity.begin(ActivityKind::Mutation);
    let result = self
      .store
      .delete_line(user_id, product_id)
      .await
      .map_err(|source| CartError::store(StoreOperation::DeleteLine, source));
    if let Ok(0) = result {
      event!(Level::DEBUG, "No cart line matched, nothing removed.");
    }
    self
      .finish_mutation(user_id, result, NoticeKind::RemoveFailed, Some(NoticeKind::Removed))
      .await
  }

  /// Deletes every line of the signed-in user in one store call.
  #[instrument(name = "CartSynchronizer::clear_cart", skip(self), err(Display))]
  pub async fn clear_cart(&self) -> CartResult<()> {
    let user_id = self.require_user("clear the cart").await?;

    let _busy = self.activity.begin(ActivityKind::Mutation);
    let result = self
      .store
      .delete_all(user_id)
      .await
      .map_err(|source| CartError::store(StoreOperation::DeleteAll, source));
    if let Ok(removed) = result {
      event!(Level::INFO, %user_id, removed, "Cart cleared.");
    }
    self
      .finish_mutation(user_id, result, NoticeKind::ClearFailed, None)
      .await
  }

  /// Snapshot of the cart for a checkout hand-off. Takes no payment and
  /// leaves the cart untouched.
  pub fn checkout_summary(&self) -> CartResult<CheckoutSummary> {
    let Some(user_id) = self.auth.current_user() else {
      self.notify(NoticeKind::SignInRequired);
      return Err(CartError::NotAuthenticated { action: "check out" });
    };
    let guard = self.state.read();
    if guard.owner != Some(user_id) || guard.view.is_empty() {
      return Err(CartError::EmptyCart);
    }
    Ok(CheckoutSummary::from_view(user_id, &guard.view))
  }

  // --- Internals ---

  /// Resolves the signed-in user for a mutation. With nobody signed in the
  /// call is refused before any store call. A user that differs from the
  /// view's owner gets their cart loaded first, so the merge rule in
  /// `add_to_cart` sees their lines.
  async fn require_user(&self, action: &'static str) -> CartResult<Uuid> {
    let Some(user_id) = self.auth.current_user() else {
      event!(Level::WARN, action, "Cart mutation attempted without a signed-in user.");
      self.end_session();
      self.notify(NoticeKind::SignInRequired);
      return Err(CartError::NotAuthenticated { action });
    };

    if self.owner() != Some(user_id) {
      self.begin_session(user_id);
      if let Err(e) = self.refresh(user_id).await {
        // Already notified; the mutation itself still goes ahead.
        event!(Level::DEBUG, error = %e, "Rehydrating fetch failed before mutation.");
      }
    }
    Ok(user_id)
  }

  async fn insert_line(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> CartResult<u64> {
    self.check_stock(product_id, quantity, None).await?;
    self
      .store
      .insert_line(NewCartLine {
        user_id,
        product_id,
        quantity,
      })
      .await
      .map_err(|source| CartError::store(StoreOperation::InsertLine, source))?;
    Ok(1)
  }

  async fn write_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> CartResult<u64> {
    let current = self.state.read().view.line_for(product_id).map(|line| line.quantity);
    self.check_stock(product_id, quantity, current).await?;
    let affected = self
      .store
      .update_quantity(user_id, product_id, quantity)
      .await
      .map_err(|source| CartError::store(StoreOperation::UpdateQuantity, source))?;
    if affected == 0 {
      event!(Level::DEBUG, %product_id, "No cart line matched the quantity update.");
    }
    Ok(affected)
  }

  /// Under `Enforce`, rejects a target above current stock. Targets at or
  /// below the line's current quantity always pass, so a line already over
  /// stock can still be stepped down.
  async fn check_stock(&self, product_id: Uuid, requested: i32, current: Option<i32>) -> CartResult<()> {
    if self.config.stock_policy == StockPolicy::Permissive {
      return Ok(());
    }
    if current.is_some_and(|current| requested <= current) {
      event!(Level::TRACE, %product_id, requested, "Quantity not increased, stock check skipped.");
      return Ok(());
    }

    let product = self
      .store
      .fetch_product(product_id)
      .await
      .map_err(|source| CartError::store(StoreOperation::FetchProduct, source))?
      .ok_or(CartError::ProductNotFound { product_id })?;

    if requested > product.stock_quantity {
      event!(
        Level::WARN,
        %product_id,
        requested,
        available = product.stock_quantity,
        "Requested quantity exceeds stock."
      );
      return Err(CartError::InsufficientStock {
        product_id,
        requested,
        available: product.stock_quantity,
      });
    }
    Ok(())
  }

  /// Raises the notice for the mutation's outcome, then refetches no matter
  /// what. A mutation error wins over a refetch error.
  async fn finish_mutation(
    &self,
    user_id: Uuid,
    result: CartResult<u64>,
    on_failure: NoticeKind,
    on_success: Option<NoticeKind>,
  ) -> CartResult<()> {
    let outcome = match result {
      Ok(affected) => {
        if let Some(kind) = on_success {
          if self.config.success_notices && affected > 0 {
            self.notify(kind);
          }
        }
        Ok(())
      }
      Err(err) => {
        event!(Level::ERROR, %user_id, error = %err, "Cart mutation failed.");
        let kind = match &err {
          CartError::InsufficientStock { available, .. } => NoticeKind::InsufficientStock {
            available: *available,
          },
          _ => on_failure,
        };
        self.notify(kind);
        Err(err)
      }
    };

    let refreshed = self.refresh(user_id).await;
    outcome?;
    refreshed.map(|_| ())
  }

  fn notify(&self, kind: NoticeKind) {
    self.notifier.notify(Notice::from(kind));
  }
}
