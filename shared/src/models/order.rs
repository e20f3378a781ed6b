//! Order Model
//!
//! Orders are created only by order intake and change afterwards only through
//! the `new -> completed` transition.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest total an order may carry: 9_999_999_999.99, the top of a
/// `NUMERIC(12, 2)` column
pub const MAX_ORDER_TOTAL: Decimal = Decimal::from_parts(3_567_587_327, 232, 0, false, 2);

/// Order lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed by a customer, awaiting fulfillment
    New,
    /// Fulfilled by an operator (terminal)
    Completed,
}

impl OrderStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Completed => "completed",
        }
    }

    /// Whether an order in this status may move to `to`
    pub const fn can_transition_to(&self, to: OrderStatus) -> bool {
        matches!((self, to), (OrderStatus::New, OrderStatus::Completed))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a stored status string is not a known [`OrderStatus`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(OrderStatus::New),
            "completed" => Ok(OrderStatus::Completed),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

impl TryFrom<String> for OrderStatus {
    type Error = UnknownOrderStatus;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub phone: String,
    /// Free-form contact and delivery details
    pub contact_details: String,
    pub comment: Option<String>,
    /// Computed server-side from catalog prices, never taken from the client
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[cfg_attr(feature = "db", sqlx(try_from = "String"))]
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Order line as persisted
///
/// `price_at_purchase` is a snapshot; later catalog price changes do not
/// touch it. `product_id` carries no foreign key, so the product may be gone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_at_purchase: Decimal,
}

impl OrderItem {
    /// Line total (`price_at_purchase * quantity`)
    pub fn line_total(&self) -> Decimal {
        self.price_at_purchase * Decimal::from(self.quantity)
    }
}

/// Order line joined with the current catalog, for operator views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItemView {
    pub product_id: i64,
    /// `None` when the product has since been deleted
    pub title: Option<String>,
    pub quantity: i32,
    #[serde(with = "rust_decimal::serde::float")]
    pub price_at_purchase: Decimal,
}

/// Order with its lines
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItemView>,
}
