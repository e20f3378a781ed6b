//! API Response types
//!
//! Success shapes for the storefront. Failures use
//! [`ErrorBody`](crate::error::ErrorBody).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Successful checkout
///
/// ```json
/// { "success": true, "orderId": 42, "total": 200.0 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub success: bool,
    pub order_id: i64,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl PlaceOrderResponse {
    pub fn new(order_id: i64, total: Decimal) -> Self {
        Self {
            success: true,
            order_id,
            total,
        }
    }
}

/// Health check payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
    pub version: String,
    /// `ok` or `unavailable`
    pub store: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_order_response_is_camel_case() {
        let json = serde_json::to_value(PlaceOrderResponse::new(42, Decimal::new(20000, 2))).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["orderId"], 42);
        assert_eq!(json["total"], 200.0);
        assert!(json.get("order_id").is_none());
    }
}
