// storefront/src/session.rs

//! A scripted shopping session that drives every cart operation once.

use crate::catalog::{BLUE_FLAME_RACER, GREEN_MONSTER_TRUCK, RED_LIGHTNING_SPEEDSTER, YELLOW_THUNDER_MUSCLE};
use crate::errors::Result as AppResult;
use diecast_cart::{CartResult, CartSynchronizer, SessionAuth};
use futures_util::future::join;
use tracing::{info, warn};
use uuid::Uuid;

// Operation failures are already surfaced as notices; the script keeps going.
fn report<T>(step: &str, result: CartResult<T>) -> Option<T> {
  match result {
    Ok(value) => Some(value),
    Err(e) => {
      warn!(step, error = %e, "Cart step failed.");
      None
    }
  }
}

fn log_totals(sync: &CartSynchronizer, step: &str) {
  info!(
    step,
    lines = sync.lines().len(),
    total_items = sync.total_items(),
    total_amount_cents = sync.total_amount(),
    phase = ?sync.phase(),
    "Cart state."
  );
}

pub async fn run(sync: &CartSynchronizer, auth: &SessionAuth, user_id: Uuid) -> AppResult<()> {
  // Signed out: the add is refused and a sign-in notice is raised.
  report("add while signed out", sync.add_to_cart(RED_LIGHTNING_SPEEDSTER, 1).await);

  auth.sign_in(user_id);
  sync.sync_session().await?;
  log_totals(sync, "signed in");

  report("add speedster", sync.add_to_cart(RED_LIGHTNING_SPEEDSTER, 1).await);
  // Same product again merges into the existing line.
  report("add speedster again", sync.add_to_cart(RED_LIGHTNING_SPEEDSTER, 2).await);
  report("add racer", sync.add_to_cart(BLUE_FLAME_RACER, 1).await);
  report("add truck", sync.add_to_cart(GREEN_MONSTER_TRUCK, 1).await);
  log_totals(sync, "after adds");

  let (muscle, racer) = join(
    sync.add_to_cart(YELLOW_THUNDER_MUSCLE, 1),
    sync.update_quantity(BLUE_FLAME_RACER, 3),
  )
  .await;
  report("concurrent add muscle", muscle);
  report("concurrent update racer", racer);
  log_totals(sync, "after concurrent mutations");

  report("remove truck", sync.remove_from_cart(GREEN_MONSTER_TRUCK).await);
  // Quantity zero removes the line.
  report("zero speedster", sync.update_quantity(RED_LIGHTNING_SPEEDSTER, 0).await);
  log_totals(sync, "after removals");

  if let Some(summary) = report("checkout summary", sync.checkout_summary()) {
    let rendered = serde_json::to_string_pretty(&summary)?;
    info!(summary = %rendered, "Checkout summary prepared.");
  }

  report("clear cart", sync.clear_cart().await);
  log_totals(sync, "after clear");

  auth.sign_out();
  sync.sync_session().await?;
  log_totals(sync, "signed out");

  Ok(())
}
