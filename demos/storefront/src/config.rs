// storefront/src/config.rs

use crate::errors::{AppError, Result};
use diecast_cart::{StockPolicy, SyncConfig};
use dotenvy::dotenv;
use std::env;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// Postgres connection string. Without one the demo runs on the in-memory store.
  pub database_url: Option<String>,
  pub max_connections: u32,
  pub stock_policy: StockPolicy,
  pub success_notices: bool,
  pub demo_user_id: Uuid,
  // Upsert the demo catalogue into `cars` on startup (Postgres only)
  pub seed_db: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let database_url = get_env("DATABASE_URL").ok().filter(|url| !url.trim().is_empty());
    let max_connections = get_env("DATABASE_MAX_CONNECTIONS")
      .unwrap_or_else(|_| "5".to_string())
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DATABASE_MAX_CONNECTIONS: {}", e)))?;
    let stock_policy = get_env("CART_STOCK_POLICY")
      .unwrap_or_else(|_| "permissive".to_string())
      .parse::<StockPolicy>()?;
    let success_notices = get_env("CART_SUCCESS_NOTICES")
      .unwrap_or_else(|_| "true".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid CART_SUCCESS_NOTICES value: {}", e)))?;
    let demo_user_id = match get_env("DEMO_USER_ID") {
      Ok(raw) => Uuid::parse_str(raw.trim()).map_err(|e| AppError::Config(format!("Invalid DEMO_USER_ID: {}", e)))?,
      Err(_) => Uuid::new_v4(),
    };
    let seed_db = get_env("SEED_DB")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_DB value: {}", e)))?;

    tracing::info!(
      backend = if database_url.is_some() { "postgres" } else { "memory" },
      ?stock_policy,
      "Application configuration loaded successfully."
    );

    Ok(Self {
      database_url,
      max_connections,
      stock_policy,
      success_notices,
      demo_user_id,
      seed_db,
    })
  }

  pub fn sync_config(&self) -> SyncConfig {
    SyncConfig::default()
      .with_stock_policy(self.stock_policy)
      .with_success_notices(self.success_notices)
  }
}
