//! Persistence layer
//!
//! [`ShopStore`] is the only way the rest of the server touches data.
//! [`PgShopStore`] is the production backend; [`MemoryShopStore`] backs
//! tests and development runs without a database.

pub mod memory;
pub mod postgres;
pub mod validation;

use async_trait::async_trait;
use chrono::NaiveDate;
use shared::models::{
    Category, CategoryCreate, Order, OrderDetail, OrderStatus, Product, ProductCreate,
    ProductUpdate, SalesFigure,
};
use std::fmt;
use thiserror::Error;

use crate::orders::{IntakeError, PlacedOrder, ValidatedOrder};

pub use memory::MemoryShopStore;
pub use postgres::PgShopStore;

/// Number of completed orders shown in the archive view
pub const ARCHIVE_LIMIT: i64 = 15;

/// Entity kind, for not-found reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Product,
    Category,
    Order,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Entity::Product => "Product",
            Entity::Category => "Category",
            Entity::Order => "Order",
        })
    }
}

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{0} {1} not found")]
    NotFound(Entity, i64),

    #[error("category {0} still has products")]
    CategoryInUse(i64),

    #[error("order {0} is already completed")]
    OrderAlreadyCompleted(i64),

    #[error("title must not be empty")]
    EmptyTitle,

    #[error("price must be between 0 and {max}, got {0}", max = shared::models::MAX_PRICE)]
    InvalidPrice(rust_decimal::Decimal),

    #[error("stock must be between 0 and {max}, got {value}")]
    InvalidStock { value: i32, max: i32 },

    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                StoreError::Unavailable(err.to_string())
            }
            other => StoreError::Database(other.to_string()),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Catalog and order persistence
#[async_trait]
pub trait ShopStore: Send + Sync {
    /// Cheap connectivity check
    async fn ping(&self) -> StoreResult<()>;

    // ========== Catalog ==========

    async fn list_products(&self) -> StoreResult<Vec<Product>>;
    async fn get_product(&self, id: i64) -> StoreResult<Product>;
    async fn create_product(&self, data: &ProductCreate) -> StoreResult<Product>;
    async fn update_product(&self, id: i64, data: &ProductUpdate) -> StoreResult<Product>;
    async fn delete_product(&self, id: i64) -> StoreResult<()>;

    async fn list_categories(&self) -> StoreResult<Vec<Category>>;
    async fn create_category(&self, data: &CategoryCreate) -> StoreResult<Category>;
    /// Fails with [`StoreError::CategoryInUse`] while any product references it
    async fn delete_category(&self, id: i64) -> StoreResult<()>;

    // ========== Orders ==========

    /// Check stock, persist the order with its lines and decrement stock as
    /// one atomic unit. Conflicting placements on the same product are
    /// serialized; nothing is written when any line is rejected.
    async fn place_order(&self, order: &ValidatedOrder) -> Result<PlacedOrder, IntakeError>;

    /// Orders in `status`, newest first
    async fn list_orders(&self, status: OrderStatus, limit: Option<i64>) -> StoreResult<Vec<Order>>;
    async fn get_order(&self, id: i64) -> StoreResult<OrderDetail>;
    /// `new -> completed`; completing twice is [`StoreError::OrderAlreadyCompleted`]
    async fn complete_order(&self, id: i64) -> StoreResult<Order>;

    // ========== Reporting ==========

    /// Completed orders created on `day` (UTC), or over all time when `None`
    async fn completed_sales(&self, day: Option<NaiveDate>) -> StoreResult<SalesFigure>;
    async fn count_orders(&self, status: OrderStatus) -> StoreResult<i64>;
    async fn units_in_stock(&self) -> StoreResult<i64>;
}
