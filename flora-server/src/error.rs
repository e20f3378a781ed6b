//! Service-layer error type
//!
//! `ServiceError` lets handlers `?` store, intake and request errors alike;
//! the mapping to a client-facing [`AppError`] happens once, here.
//! Infrastructure causes are logged in full and answered generically.

use axum::extract::rejection::JsonRejection;
use axum::response::IntoResponse;
use shared::error::{AppError, ErrorCode};
use shared::models::MAX_PRICE;

use crate::db::{Entity, StoreError};
use crate::orders::{IntakeError, MAX_QUANTITY};

#[derive(Debug)]
pub enum ServiceError {
    Store(StoreError),
    Intake(IntakeError),
    App(AppError),
}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        ServiceError::Store(e)
    }
}

impl From<IntakeError> for ServiceError {
    fn from(e: IntakeError) -> Self {
        ServiceError::Intake(e)
    }
}

impl From<AppError> for ServiceError {
    fn from(e: AppError) -> Self {
        ServiceError::App(e)
    }
}

/// Unreadable JSON bodies (missing fields, wrong types, bad syntax) answer
/// with `InvalidRequest` in the usual error body
impl From<JsonRejection> for ServiceError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(error = %rejection.body_text(), "Malformed request body");
        ServiceError::App(AppError::invalid_request(rejection.body_text()))
    }
}

fn store_error_to_app(err: StoreError) -> AppError {
    match err {
        StoreError::NotFound(entity, id) => {
            let code = match entity {
                Entity::Product => ErrorCode::ProductNotFound,
                Entity::Category => ErrorCode::CategoryNotFound,
                Entity::Order => ErrorCode::OrderNotFound,
            };
            AppError::with_message(code, format!("{entity} {id} not found")).with_detail("id", id)
        }
        StoreError::CategoryInUse(id) => AppError::with_message(
            ErrorCode::CategoryHasProducts,
            "Category still has products; move or delete them first",
        )
        .with_detail("id", id),
        StoreError::OrderAlreadyCompleted(id) => {
            AppError::new(ErrorCode::OrderAlreadyCompleted).with_detail("id", id)
        }
        StoreError::EmptyTitle => AppError::with_message(ErrorCode::RequiredField, "Title is required"),
        StoreError::InvalidPrice(_) => AppError::with_message(
            ErrorCode::ProductInvalidPrice,
            format!("Price must be between 0 and {MAX_PRICE}"),
        ),
        StoreError::InvalidStock { max, .. } => AppError::with_message(
            ErrorCode::ProductInvalidStock,
            format!("Stock must be between 0 and {max}"),
        ),
        StoreError::Unavailable(cause) => {
            tracing::error!(error = %cause, "Store unavailable");
            AppError::store_unavailable()
        }
        StoreError::Database(cause) => {
            tracing::error!(error = %cause, "Service database error");
            AppError::new(ErrorCode::DatabaseError)
        }
    }
}

fn intake_error_to_app(err: IntakeError) -> AppError {
    match err {
        IntakeError::EmptyCart => AppError::new(ErrorCode::OrderEmpty),
        IntakeError::InvalidQuantity {
            product_id,
            quantity,
        } => AppError::with_message(
            ErrorCode::OrderInvalidQuantity,
            format!("Quantity must be a whole number between 1 and {MAX_QUANTITY}"),
        )
        .with_detail("product_id", product_id)
        .with_detail("quantity", quantity),
        IntakeError::MissingCustomerField(field) => AppError::with_message(
            ErrorCode::OrderCustomerInvalid,
            format!("Customer {field} is required"),
        )
        .with_detail("field", field),
        IntakeError::ProductNotFound { product_id } => AppError::with_message(
            ErrorCode::ProductNotFound,
            format!("Product {product_id} not found"),
        )
        .with_detail("product_id", product_id),
        IntakeError::InsufficientStock {
            product_id,
            title,
            requested,
            available,
        } => AppError::with_message(
            ErrorCode::ProductOutOfStock,
            format!("Not enough stock for {title}"),
        )
        .with_detail("product_id", product_id)
        .with_detail("requested", requested)
        .with_detail("available", available),
        IntakeError::TotalTooLarge { max } => AppError::with_message(
            ErrorCode::OrderTotalTooLarge,
            format!("Order total must not exceed {max}"),
        ),
        IntakeError::Store(e) => store_error_to_app(e),
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::App(app_err) => app_err,
            ServiceError::Store(store_err) => store_error_to_app(store_err),
            ServiceError::Intake(intake_err) => intake_error_to_app(intake_err),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> axum::response::Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
