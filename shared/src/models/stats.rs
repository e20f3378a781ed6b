//! Sales statistics views for operators

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Completed-order count and revenue over some period
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SalesFigure {
    pub completed_orders: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub revenue: Decimal,
}

/// Sales for one calendar day (UTC)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DaySales {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub sales: SalesFigure,
}

/// Dashboard summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesStats {
    pub today: DaySales,
    pub yesterday: DaySales,
    pub all_time: SalesFigure,
    /// Orders still in `new`
    pub active_orders: i64,
    /// Sum of stock over all products
    pub units_in_stock: i64,
}
