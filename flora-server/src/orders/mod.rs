//! Order intake
//!
//! A checkout request flows through:
//! 1. [`ValidatedOrder::try_from`]: customer fields, empty cart, quantities
//! 2. [`ShopStore::place_order`](crate::db::ShopStore::place_order): locked
//!    stock check, [`price_cart`], inserts and decrements in one transaction
//! 3. [`Notifier::dispatch`](crate::notify::Notifier::dispatch): operator
//!    fan-out after commit

mod error;
mod intake;
mod pricing;
mod report;
mod validation;

pub use error::IntakeError;
pub use intake::{OrderIntake, OrderPlacement};
pub use pricing::{PricedCart, PricedLine, StockSnapshot, price_cart};
pub use report::{parse_day, sales_stats};
pub use validation::{MAX_QUANTITY, OrderLine, ValidatedOrder};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::OrderItem;

/// A committed order as returned by the store
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order_id: i64,
    pub customer_name: String,
    pub total: Decimal,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItem>,
}
