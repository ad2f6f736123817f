// storefront/src/main.rs

mod catalog;
mod config;
mod errors;
mod session;
mod store;

use crate::config::AppConfig;
use crate::errors::Result as AppResult;
use crate::store::PgCartStore;

use diecast_cart::{CartStore, CartSynchronizer, SessionAuth, TracingNotifier};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

#[tokio::main]
async fn main() -> AppResult<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting storefront cart session...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => cfg,
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(e);
    }
  };

  let store: Arc<dyn CartStore> = match &app_config.database_url {
    Some(url) => {
      let pool = match PgPoolOptions::new()
        .max_connections(app_config.max_connections)
        .connect(url)
        .await
      {
        Ok(pool) => {
          tracing::info!("Successfully connected to the database.");
          pool
        }
        Err(e) => {
          tracing::error!(error = %e, "Failed to connect to the database.");
          return Err(e.into());
        }
      };
      let pg_store = PgCartStore::new(pool);
      if app_config.seed_db {
        pg_store.seed_catalogue(&catalog::demo_catalogue()).await?;
      }
      Arc::new(pg_store)
    }
    None => {
      tracing::info!("DATABASE_URL not set, using the in-memory cart store.");
      Arc::new(catalog::seeded_memory_store())
    }
  };

  let auth = Arc::new(SessionAuth::new());
  let sync = CartSynchronizer::new(store, auth.clone(), Arc::new(TracingNotifier), app_config.sync_config());

  session::run(&sync, &auth, app_config.demo_user_id).await?;

  tracing::info!("Storefront cart session finished.");
  Ok(())
}
