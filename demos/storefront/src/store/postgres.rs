// storefront/src/store/postgres.rs

//! `CartStore` over the `cars` and `cart_items` tables in `schema.sql`.

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diecast_cart::{CartLine, CartStore, NewCartLine, ProductSnapshot, StoreError, StoreOperation};
use sqlx::{FromRow, PgPool};
use tracing::{event, Level};
use uuid::Uuid;

#[derive(Debug, FromRow)]
struct CarRow {
  id: Uuid,
  name: String,
  price_cents: i64,
  image_url: Option<String>,
  stock_quantity: i32,
}

impl From<CarRow> for ProductSnapshot {
  fn from(row: CarRow) -> Self {
    ProductSnapshot {
      id: row.id,
      name: row.name,
      price_cents: row.price_cents,
      image_url: row.image_url,
      stock_quantity: row.stock_quantity,
    }
  }
}

// One cart_items row joined with its car.
#[derive(Debug, FromRow)]
struct CartLineRow {
  id: Uuid,
  user_id: Uuid,
  car_id: Uuid,
  quantity: i32,
  created_at: DateTime<Utc>,
  car_name: String,
  car_price_cents: i64,
  car_image_url: Option<String>,
  car_stock_quantity: i32,
}

impl From<CartLineRow> for CartLine {
  fn from(row: CartLineRow) -> Self {
    CartLine {
      id: row.id,
      user_id: row.user_id,
      product_id: row.car_id,
      quantity: row.quantity,
      added_at: row.created_at,
      product: ProductSnapshot {
        id: row.car_id,
        name: row.car_name,
        price_cents: row.car_price_cents,
        image_url: row.car_image_url,
        stock_quantity: row.car_stock_quantity,
      },
    }
  }
}

#[derive(Debug, Clone)]
pub struct PgCartStore {
  pool: PgPool,
}

impl PgCartStore {
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }

  /// Upserts catalogue rows so the demo session has something to buy.
  pub async fn seed_catalogue(&self, products: &[ProductSnapshot]) -> Result<(), sqlx::Error> {
    for product in products {
      sqlx::query(
        "INSERT INTO cars (id, name, price_cents, image_url, stock_quantity) VALUES ($1, $2, $3, $4, $5) \
         ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name, price_cents = EXCLUDED.price_cents, \
         image_url = EXCLUDED.image_url, stock_quantity = EXCLUDED.stock_quantity, updated_at = NOW()",
      )
      .bind(product.id)
      .bind(&product.name)
      .bind(product.price_cents)
      .bind(&product.image_url)
      .bind(product.stock_quantity)
      .execute(&self.pool)
      .await?;
    }
    event!(Level::INFO, count = products.len(), "Catalogue seeded.");
    Ok(())
  }
}

fn map_sqlx_error(err: sqlx::Error, operation: StoreOperation, user_id: Uuid, product_id: Option<Uuid>) -> StoreError {
  match &err {
    sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
      return StoreError::Unavailable(err.to_string());
    }
    sqlx::Error::Database(db_err) => {
      if let Some(product_id) = product_id {
        if db_err.is_unique_violation() {
          return StoreError::Conflict { user_id, product_id };
        }
        if db_err.is_foreign_key_violation() {
          return StoreError::UnknownProduct(product_id);
        }
      }
      if db_err.is_check_violation() {
        return StoreError::Constraint(db_err.message().to_string());
      }
    }
    _ => {}
  }
  let source = anyhow::Error::new(err).context(format!("Postgres {} for user {}", operation, user_id));
  StoreError::from(source)
}

#[async_trait]
impl CartStore for PgCartStore {
  async fn fetch_lines(&self, user_id: Uuid) -> Result<Vec<CartLine>, StoreError> {
    let rows: Vec<CartLineRow> = sqlx::query_as(
      "SELECT ci.id, ci.user_id, ci.car_id, ci.quantity, ci.created_at, \
       c.name AS car_name, c.price_cents AS car_price_cents, c.image_url AS car_image_url, \
       c.stock_quantity AS car_stock_quantity \
       FROM cart_items ci JOIN cars c ON c.id = ci.car_id \
       WHERE ci.user_id = $1 ORDER BY ci.created_at, ci.id",
    )
    .bind(user_id)
    .fetch_all(&self.pool)
    .await
    .map_err(|e| map_sqlx_error(e, StoreOperation::FetchLines, user_id, None))?;

    Ok(rows.into_iter().map(CartLine::from).collect())
  }

  async fn fetch_product(&self, product_id: Uuid) -> Result<Option<ProductSnapshot>, StoreError> {
    let row: Option<CarRow> =
      sqlx::query_as("SELECT id, name, price_cents, image_url, stock_quantity FROM cars WHERE id = $1")
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .with_context(|| format!("Postgres fetch_product for car {}", product_id))?;

    Ok(row.map(ProductSnapshot::from))
  }

  async fn insert_line(&self, line: NewCartLine) -> Result<(), StoreError> {
    sqlx::query("INSERT INTO cart_items (user_id, car_id, quantity) VALUES ($1, $2, $3)")
      .bind(line.user_id)
      .bind(line.product_id)
      .bind(line.quantity)
      .execute(&self.pool)
      .await
      .map_err(|e| map_sqlx_error(e, StoreOperation::InsertLine, line.user_id, Some(line.product_id)))?;
    Ok(())
  }

  async fn update_quantity(&self, user_id: Uuid, product_id: Uuid, quantity: i32) -> Result<u64, StoreError> {
    let result = sqlx::query("UPDATE cart_items SET quantity = $3 WHERE user_id = $1 AND car_id = $2")
      .bind(user_id)
      .bind(product_id)
      .bind(quantity)
      .execute(&self.pool)
      .await
      .map_err(|e| map_sqlx_error(e, StoreOperation::UpdateQuantity, user_id, Some(product_id)))?;
    Ok(result.rows_affected())
  }

  async fn delete_line(&self, user_id: Uuid, product_id: Uuid) -> Result<u64, StoreError> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1 AND car_id = $2")
      .bind(user_id)
      .bind(product_id)
      .execute(&self.pool)
      .await
      .map_err(|e| map_sqlx_error(e, StoreOperation::DeleteLine, user_id, Some(product_id)))?;
    Ok(result.rows_affected())
  }

  async fn delete_all(&self, user_id: Uuid) -> Result<u64, StoreError> {
    let result = sqlx::query("DELETE FROM cart_items WHERE user_id = $1")
      .bind(user_id)
      .execute(&self.pool)
      .await
      .map_err(|e| map_sqlx_error(e, StoreOperation::DeleteAll, user_id, None))?;
    Ok(result.rows_affected())
  }
}
