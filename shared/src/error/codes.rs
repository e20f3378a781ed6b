//! Error codes for the flower shop
//!
//! Codes are shared by the server and any client that reads the `code`
//! field of an error body. Ranges:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 4xxx: Order errors
//! - 6xxx: Product and category errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code enum
///
/// Serialized as a plain number so storefront scripts can switch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Invalid request
    InvalidRequest = 5,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,

    // ==================== 1xxx: Auth ====================
    /// Caller did not identify as an operator
    NotAuthenticated = 1001,

    // ==================== 2xxx: Permission ====================
    /// Caller is not on the operator allow-list
    OperatorRequired = 2003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has already been completed
    OrderAlreadyCompleted = 4003,
    /// Cart has no lines
    OrderEmpty = 4007,
    /// Cart line quantity is not a positive whole number in range
    OrderInvalidQuantity = 4008,
    /// Customer contact fields are missing
    OrderCustomerInvalid = 4009,
    /// Cart total does not fit the stored order total
    OrderTotalTooLarge = 4010,

    // ==================== 6xxx: Product ====================
    /// Product not found
    ProductNotFound = 6001,
    /// Product price is invalid
    ProductInvalidPrice = 6002,
    /// Not enough stock for the requested quantity
    ProductOutOfStock = 6003,
    /// Product stock value is invalid
    ProductInvalidStock = 6004,
    /// Category not found
    CategoryNotFound = 6101,
    /// Category still has products
    CategoryHasProducts = 6102,

    // ==================== 9xxx: System ====================
    /// Database error
    DatabaseError = 9002,
    /// Data store cannot be reached
    StoreUnavailable = 9006,
}

impl ErrorCode {
    /// Every defined code, in numeric order
    pub const ALL: [ErrorCode; 20] = [
        ErrorCode::Success,
        ErrorCode::InvalidRequest,
        ErrorCode::InvalidFormat,
        ErrorCode::RequiredField,
        ErrorCode::NotAuthenticated,
        ErrorCode::OperatorRequired,
        ErrorCode::OrderNotFound,
        ErrorCode::OrderAlreadyCompleted,
        ErrorCode::OrderEmpty,
        ErrorCode::OrderInvalidQuantity,
        ErrorCode::OrderCustomerInvalid,
        ErrorCode::OrderTotalTooLarge,
        ErrorCode::ProductNotFound,
        ErrorCode::ProductInvalidPrice,
        ErrorCode::ProductOutOfStock,
        ErrorCode::ProductInvalidStock,
        ErrorCode::CategoryNotFound,
        ErrorCode::CategoryHasProducts,
        ErrorCode::DatabaseError,
        ErrorCode::StoreUnavailable,
    ];

    /// Get the numeric code value
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    /// Check if this is a success code
    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Get the default message for this error code
    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",

            // Auth
            ErrorCode::NotAuthenticated => "Operator identity required",

            // Permission
            ErrorCode::OperatorRequired => "Operator access required",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderAlreadyCompleted => "Order has already been completed",
            ErrorCode::OrderEmpty => "Cart is empty",
            ErrorCode::OrderInvalidQuantity => "Quantity must be a positive whole number",
            ErrorCode::OrderCustomerInvalid => "Customer name and phone are required",
            ErrorCode::OrderTotalTooLarge => "Order total is too large",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product price is out of range",
            ErrorCode::ProductOutOfStock => "Not enough stock",
            ErrorCode::ProductInvalidStock => "Product stock is out of range",
            ErrorCode::CategoryNotFound => "Category not found",
            ErrorCode::CategoryHasProducts => "Category still has products",

            // System
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::StoreUnavailable => "Service temporarily unavailable",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        ErrorCode::ALL
            .iter()
            .copied()
            .find(|code| code.code() == value)
            .ok_or(InvalidErrorCode(value))
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
