//! Unified error system for the flower shop
//!
//! - [`ErrorCode`]: numeric codes shared with the storefront
//! - [`ErrorCategory`]: classification of codes by domain
//! - [`AppError`]: code, message and optional details
//! - [`ErrorBody`]: the `{ success: false, error, code }` wire shape
//! - [`ApiResponse`]: envelope for successful reads
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::with_message(ErrorCode::ProductOutOfStock, "Not enough stock for Peonies")
//!     .with_detail("available", 2);
//! let body = ErrorBody::from(&err);
//! assert!(!body.success);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{ApiResponse, AppError, AppResult, ErrorBody};
