//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    pub fn http_status(&self) -> StatusCode {
        match self {
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::OrderNotFound | Self::ProductNotFound | Self::CategoryNotFound => {
                StatusCode::NOT_FOUND
            }

            // 409 Conflict
            Self::OrderAlreadyCompleted
            | Self::ProductOutOfStock
            | Self::CategoryHasProducts => StatusCode::CONFLICT,

            // 401 Unauthorized
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,

            // 403 Forbidden
            Self::OperatorRequired => StatusCode::FORBIDDEN,

            // 503 Service Unavailable (transient, client can retry)
            Self::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            Self::DatabaseError => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation and business rules)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
