//! Request types for the shared crate
//!
//! Inbound payloads accepted by the public storefront API and operator API.

use serde::{Deserialize, Serialize};

/// One cart line: a product id and the requested quantity
///
/// `qty` is signed so that zero and negative values reach validation and are
/// reported as a quantity error instead of a body-parsing error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: i64,
    pub qty: i64,
}

/// Checkout request submitted by the storefront
///
/// ```json
/// { "name": "Anna", "phone": "+100", "details": "Main st. 1",
///   "cart": [{ "id": 5, "qty": 2 }] }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub name: String,
    pub phone: String,
    /// Contact and delivery details
    #[serde(default)]
    pub details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub cart: Vec<CartLine>,
}

/// Day selector for operator stats (`DD.MM.YYYY`)
#[derive(Debug, Clone, Deserialize)]
pub struct StatsDayQuery {
    pub date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_place_order_request_defaults() {
        let req: PlaceOrderRequest =
            serde_json::from_str(r#"{"name":"Anna","phone":"+100"}"#).unwrap();
        assert!(req.cart.is_empty());
        assert!(req.details.is_empty());
        assert!(req.comment.is_none());
    }

    #[test]
    fn test_fractional_quantity_is_rejected() {
        let result: Result<PlaceOrderRequest, _> = serde_json::from_str(
            r#"{"name":"Anna","phone":"+100","details":"","cart":[{"id":5,"qty":1.5}]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_negative_quantity_parses() {
        let req: PlaceOrderRequest = serde_json::from_str(
            r#"{"name":"Anna","phone":"+100","details":"","cart":[{"id":5,"qty":-2}]}"#,
        )
        .unwrap();
        assert_eq!(req.cart[0], CartLine { id: 5, qty: -2 });
    }
}
