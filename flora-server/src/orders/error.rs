//! Order intake errors

use rust_decimal::Decimal;
use thiserror::Error;

use crate::db::StoreError;

/// Why a checkout was rejected or could not be recorded
///
/// Every variant except [`IntakeError::Store`] is caused by the request and
/// is raised before anything is written.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("cart is empty")]
    EmptyCart,

    #[error("invalid quantity {quantity} for product {product_id}")]
    InvalidQuantity { product_id: i64, quantity: i64 },

    #[error("customer {0} is required")]
    MissingCustomerField(&'static str),

    #[error("product {product_id} not found")]
    ProductNotFound { product_id: i64 },

    #[error("not enough stock for {title}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: i64,
        title: String,
        requested: i32,
        available: i32,
    },

    #[error("order total exceeds {max}")]
    TotalTooLarge { max: Decimal },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntakeError {
    pub fn is_client_error(&self) -> bool {
        !matches!(self, IntakeError::Store(_))
    }
}
