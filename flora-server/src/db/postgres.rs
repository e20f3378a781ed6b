//! PostgreSQL store
//!
//! Order placement locks the cart's product rows with `SELECT ... FOR UPDATE`
//! in ascending id order, so conflicting placements queue on the row locks
//! and overlapping carts cannot deadlock.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::collections::HashMap;
use std::time::Duration;

use shared::models::{
    Category, CategoryCreate, Order, OrderDetail, OrderItem, OrderItemView, OrderStatus, Product,
    ProductCreate, ProductUpdate, SalesFigure,
};

use super::validation::{validate_category_create, validate_product_create, validate_product_update};
use super::{Entity, ShopStore, StoreError, StoreResult};
use crate::orders::{IntakeError, PlacedOrder, StockSnapshot, ValidatedOrder, price_cart};

const ORDER_COLUMNS: &str =
    "id, customer_name, phone, contact_details, comment, total_price, status, created_at";

impl From<sqlx::Error> for IntakeError {
    fn from(err: sqlx::Error) -> Self {
        IntakeError::Store(err.into())
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|e| e.is_foreign_key_violation())
}

#[derive(Clone)]
pub struct PgShopStore {
    pool: PgPool,
}

impl PgShopStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and apply pending migrations
    pub async fn connect(database_url: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| StoreError::Database(format!("migration failed: {e}")))?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl ShopStore for PgShopStore {
    async fn ping(&self) -> StoreResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_products(&self) -> StoreResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, Product>(
            "SELECT id, title, description, price, stock, category_id FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_product(&self, id: i64) -> StoreResult<Product> {
        sqlx::query_as::<_, Product>(
            "SELECT id, title, description, price, stock, category_id FROM products WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(Entity::Product, id))
    }

    async fn create_product(&self, data: &ProductCreate) -> StoreResult<Product> {
        validate_product_create(data)?;
        sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (title, description, price, stock, category_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, title, description, price, stock, category_id
            "#,
        )
        .bind(data.title.trim())
        .bind(&data.description)
        .bind(data.price)
        .bind(data.stock)
        .bind(data.category_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match data.category_id {
            Some(category_id) if is_foreign_key_violation(&e) => {
                StoreError::NotFound(Entity::Category, category_id)
            }
            _ => e.into(),
        })
    }

    async fn update_product(&self, id: i64, data: &ProductUpdate) -> StoreResult<Product> {
        validate_product_update(data)?;
        sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                stock = COALESCE($5, stock),
                category_id = CASE WHEN $6 THEN $7 ELSE category_id END
            WHERE id = $1
            RETURNING id, title, description, price, stock, category_id
            "#,
        )
        .bind(id)
        .bind(data.title.as_deref().map(str::trim))
        .bind(data.description.as_deref())
        .bind(data.price)
        .bind(data.stock)
        .bind(data.category_id.is_some())
        .bind(data.category_id.flatten())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match data.category_id {
            Some(Some(category_id)) if is_foreign_key_violation(&e) => {
                StoreError::NotFound(Entity::Category, category_id)
            }
            _ => e.into(),
        })?
        .ok_or(StoreError::NotFound(Entity::Product, id))
    }

    async fn delete_product(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(Entity::Product, id));
        }
        Ok(())
    }

    async fn list_categories(&self) -> StoreResult<Vec<Category>> {
        let rows = sqlx::query_as::<_, Category>("SELECT id, title FROM categories ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_category(&self, data: &CategoryCreate) -> StoreResult<Category> {
        validate_category_create(data)?;
        let row = sqlx::query_as::<_, Category>(
            "INSERT INTO categories (title) VALUES ($1) RETURNING id, title",
        )
        .bind(data.title.trim())
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete_category(&self, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    StoreError::CategoryInUse(id)
                } else {
                    e.into()
                }
            })?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(Entity::Category, id));
        }
        Ok(())
    }

    async fn place_order(&self, order: &ValidatedOrder) -> Result<PlacedOrder, IntakeError> {
        let mut tx = self.pool.begin().await?;

        let ids = order.product_ids_sorted();
        let locked: Vec<StockSnapshot> = sqlx::query_as(
            "SELECT id, title, price, stock FROM products WHERE id = ANY($1) ORDER BY id FOR UPDATE",
        )
        .bind(&ids)
        .fetch_all(&mut *tx)
        .await?;
        let snapshot: HashMap<i64, StockSnapshot> =
            locked.into_iter().map(|row| (row.id, row)).collect();

        // Rejections return early; dropping `tx` rolls everything back.
        let priced = price_cart(&order.lines, &snapshot)?;

        let (order_id, created_at): (i64, DateTime<Utc>) = sqlx::query_as(
            r#"
            INSERT INTO orders (customer_name, phone, contact_details, comment, total_price, status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, created_at
            "#,
        )
        .bind(&order.customer_name)
        .bind(&order.phone)
        .bind(&order.contact_details)
        .bind(order.comment.as_deref())
        .bind(priced.total)
        .bind(OrderStatus::New.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let product_ids: Vec<i64> = priced.lines.iter().map(|l| l.product_id).collect();
        let quantities: Vec<i32> = priced.lines.iter().map(|l| l.quantity).collect();
        let prices: Vec<Decimal> = priced.lines.iter().map(|l| l.unit_price).collect();
        sqlx::query(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, price_at_purchase)
            SELECT $1, * FROM UNNEST($2::bigint[], $3::integer[], $4::numeric[])
            "#,
        )
        .bind(order_id)
        .bind(&product_ids)
        .bind(&quantities)
        .bind(&prices)
        .execute(&mut *tx)
        .await?;

        for line in &priced.lines {
            let result =
                sqlx::query("UPDATE products SET stock = stock - $2 WHERE id = $1 AND stock >= $2")
                    .bind(line.product_id)
                    .bind(line.quantity)
                    .execute(&mut *tx)
                    .await?;
            if result.rows_affected() != 1 {
                let current = snapshot.get(&line.product_id);
                return Err(IntakeError::InsufficientStock {
                    product_id: line.product_id,
                    title: current.map(|p| p.title.clone()).unwrap_or_default(),
                    requested: line.quantity,
                    available: current.map(|p| p.stock).unwrap_or(0),
                });
            }
        }

        tx.commit().await?;

        let items = priced
            .lines
            .iter()
            .map(|line| OrderItem {
                order_id,
                product_id: line.product_id,
                quantity: line.quantity,
                price_at_purchase: line.unit_price,
            })
            .collect();

        Ok(PlacedOrder {
            order_id,
            customer_name: order.customer_name.clone(),
            total: priced.total,
            created_at,
            items,
        })
    }

    async fn list_orders(&self, status: OrderStatus, limit: Option<i64>) -> StoreResult<Vec<Order>> {
        let rows = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE status = $1 ORDER BY created_at DESC, id DESC LIMIT $2"
        ))
        .bind(status.as_str())
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn get_order(&self, id: i64) -> StoreResult<OrderDetail> {
        let order = sqlx::query_as::<_, Order>(&format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound(Entity::Order, id))?;

        let items = sqlx::query_as::<_, OrderItemView>(
            r#"
            SELECT oi.product_id, p.title, oi.quantity, oi.price_at_purchase
            FROM order_items oi
            LEFT JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = $1
            ORDER BY oi.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(OrderDetail { order, items })
    }

    async fn complete_order(&self, id: i64) -> StoreResult<Order> {
        let updated = sqlx::query_as::<_, Order>(&format!(
            "UPDATE orders SET status = $2 WHERE id = $1 AND status = $3 RETURNING {ORDER_COLUMNS}"
        ))
        .bind(id)
        .bind(OrderStatus::Completed.as_str())
        .bind(OrderStatus::New.as_str())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(order) = updated {
            return Ok(order);
        }

        let exists: Option<(i64,)> = sqlx::query_as("SELECT id FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        match exists {
            Some(_) => Err(StoreError::OrderAlreadyCompleted(id)),
            None => Err(StoreError::NotFound(Entity::Order, id)),
        }
    }

    async fn completed_sales(&self, day: Option<NaiveDate>) -> StoreResult<SalesFigure> {
        let (completed_orders, revenue): (i64, Decimal) = sqlx::query_as(
            r#"
            SELECT COUNT(*)::bigint, COALESCE(SUM(total_price), 0)
            FROM orders
            WHERE status = $1
              AND ($2::date IS NULL OR (created_at AT TIME ZONE 'UTC')::date = $2)
            "#,
        )
        .bind(OrderStatus::Completed.as_str())
        .bind(day)
        .fetch_one(&self.pool)
        .await?;
        Ok(SalesFigure {
            completed_orders,
            revenue,
        })
    }

    async fn count_orders(&self, status: OrderStatus) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*)::bigint FROM orders WHERE status = $1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn units_in_stock(&self) -> StoreResult<i64> {
        let (units,): (i64,) =
            sqlx::query_as("SELECT COALESCE(SUM(stock), 0)::bigint FROM products")
                .fetch_one(&self.pool)
                .await?;
        Ok(units)
    }
}
