use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{Money, OrderId, OrderLineId, ProductId, RestaurantId, UserId};
use rust_decimal::Decimal;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Postgres, Row, Transaction};
use uuid::Uuid;

use crate::records::{OrderLineRecord, OrderRecord, OrderStatus, ProductRecord, RestaurantRecord};
use crate::store::{Store, StoreTx};
use crate::{Result, StoreError};

/// PostgreSQL-backed store implementation.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        tracing::debug!("running database migrations");
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }
}

fn money_from_row(row: &PgRow, column: &'static str) -> Result<Money> {
    let value: Decimal = row.try_get(column).map_err(StoreError::Database)?;
    Money::from_decimal(value).ok_or(StoreError::InvalidMoney { column })
}

fn row_to_restaurant(row: &PgRow) -> Result<RestaurantRecord> {
    Ok(RestaurantRecord {
        id: RestaurantId::from_uuid(row.try_get::<Uuid, _>("id")?),
        name: row.try_get("name")?,
        address: row.try_get("address")?,
    })
}

fn row_to_product(row: &PgRow) -> Result<ProductRecord> {
    Ok(ProductRecord {
        id: ProductId::from_uuid(row.try_get::<Uuid, _>("id")?),
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: money_from_row(row, "price")?,
        is_active: row.try_get("is_active")?,
        restaurant_id: RestaurantId::from_uuid(row.try_get::<Uuid, _>("restaurant_id")?),
    })
}

fn row_to_order(row: &PgRow) -> Result<OrderRecord> {
    let status_text: String = row.try_get("status")?;
    let status = OrderStatus::parse(&status_text)
        .ok_or_else(|| StoreError::Unavailable(format!("unknown order status {status_text:?}")))?;

    Ok(OrderRecord {
        id: OrderId::from_uuid(row.try_get::<Uuid, _>("id")?),
        total_amount: money_from_row(row, "total_amount")?,
        status,
        user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id")?),
        restaurant_id: RestaurantId::from_uuid(row.try_get::<Uuid, _>("restaurant_id")?),
        created_at: row.try_get::<DateTime<Utc>, _>("created_at")?,
    })
}

fn row_to_line(row: &PgRow) -> Result<OrderLineRecord> {
    let quantity: i32 = row.try_get("quantity")?;

    Ok(OrderLineRecord {
        id: OrderLineId::from_uuid(row.try_get::<Uuid, _>("id")?),
        quantity: quantity as u32,
        price: money_from_row(row, "price")?,
        order_id: OrderId::from_uuid(row.try_get::<Uuid, _>("order_id")?),
        product_id: ProductId::from_uuid(row.try_get::<Uuid, _>("product_id")?),
    })
}

#[async_trait]
impl Store for PostgresStore {
    type Tx = PostgresTx;

    async fn begin(&self) -> Result<Self::Tx> {
        let tx = self.pool.begin().await?;
        Ok(PostgresTx { tx })
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<(OrderRecord, Vec<OrderLineRecord>)>> {
        let row = sqlx::query(
            r#"
            SELECT id, total_amount, status, user_id, restaurant_id, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };
        let order = row_to_order(&row)?;

        let line_rows = sqlx::query(
            r#"
            SELECT id, quantity, price, order_id, product_id
            FROM order_items
            WHERE order_id = $1
            ORDER BY id ASC
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        let lines = line_rows
            .iter()
            .map(row_to_line)
            .collect::<Result<Vec<_>>>()?;

        Ok(Some((order, lines)))
    }

    async fn find_restaurant(&self, id: RestaurantId) -> Result<Option<RestaurantRecord>> {
        let row = sqlx::query("SELECT id, name, address FROM restaurants WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(row_to_restaurant).transpose()
    }

    async fn insert_restaurant(&self, restaurant: &RestaurantRecord) -> Result<()> {
        sqlx::query("INSERT INTO restaurants (id, name, address) VALUES ($1, $2, $3)")
            .bind(restaurant.id.as_uuid())
            .bind(&restaurant.name)
            .bind(&restaurant.address)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn insert_product(&self, product: &ProductRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price, is_active, restaurant_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(product.id.as_uuid())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.to_decimal())
        .bind(product.is_active)
        .bind(product.restaurant_id.as_uuid())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_product_price(
        &self,
        id: ProductId,
        restaurant_id: RestaurantId,
        price: Money,
    ) -> Result<bool> {
        let result = sqlx::query("UPDATE products SET price = $3 WHERE id = $1 AND restaurant_id = $2")
            .bind(id.as_uuid())
            .bind(restaurant_id.as_uuid())
            .bind(price.to_decimal())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn products_for_restaurant(&self, id: RestaurantId) -> Result<Vec<ProductRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, description, price, is_active, restaurant_id
            FROM products
            WHERE restaurant_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_product).collect()
    }
}

/// A PostgreSQL transaction.
///
/// Wraps an open `sqlx` transaction; dropping it without committing rolls
/// back and returns the connection to the pool.
pub struct PostgresTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl StoreTx for PostgresTx {
    async fn find_restaurant(&mut self, id: RestaurantId) -> Result<Option<RestaurantRecord>> {
        let row = sqlx::query("SELECT id, name, address FROM restaurants WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&mut *self.tx)
            .await?;

        row.as_ref().map(row_to_restaurant).transpose()
    }

    async fn find_product(
        &mut self,
        id: ProductId,
        restaurant_id: RestaurantId,
    ) -> Result<Option<ProductRecord>> {
        // FOR SHARE blocks a concurrent price UPDATE until this
        // transaction finishes, so the snapshot written below is the
        // price that was actually in force at commit time.
        let row = sqlx::query(
            r#"
            SELECT id, name, description, price, is_active, restaurant_id
            FROM products
            WHERE id = $1 AND restaurant_id = $2
            FOR SHARE
            "#,
        )
        .bind(id.as_uuid())
        .bind(restaurant_id.as_uuid())
        .fetch_optional(&mut *self.tx)
        .await?;

        row.as_ref().map(row_to_product).transpose()
    }

    async fn insert_order(&mut self, order: &OrderRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO orders (id, total_amount, status, user_id, restaurant_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(order.total_amount.to_decimal())
        .bind(order.status.as_str())
        .bind(order.user_id.as_uuid())
        .bind(order.restaurant_id.as_uuid())
        .bind(order.created_at)
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn insert_order_line(&mut self, line: &OrderLineRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO order_items (id, quantity, price, order_id, product_id)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(line.id.as_uuid())
        .bind(line.quantity as i32)
        .bind(line.price.to_decimal())
        .bind(line.order_id.as_uuid())
        .bind(line.product_id.as_uuid())
        .execute(&mut *self.tx)
        .await?;

        Ok(())
    }

    async fn recompute_order_total(&mut self, order_id: OrderId) -> Result<Money> {
        let row = sqlx::query(
            r#"
            UPDATE orders
            SET total_amount = (
                SELECT COALESCE(SUM(price * quantity), 0)
                FROM order_items
                WHERE order_id = $1
            )
            WHERE id = $1
            RETURNING total_amount
            "#,
        )
        .bind(order_id.as_uuid())
        .fetch_one(&mut *self.tx)
        .await?;

        money_from_row(&row, "total_amount")
    }

    async fn commit(self) -> Result<()> {
        self.tx.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<()> {
        self.tx.rollback().await?;
        Ok(())
    }
}
