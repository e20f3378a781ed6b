//! Operator Extractor
//!
//! Use [`Operator`] as a handler argument to restrict the handler to the
//! allow-list.

use axum::{extract::FromRequestParts, http::request::Parts};
use shared::error::AppError;

use crate::state::AppState;

pub const OPERATOR_HEADER: &str = "x-operator-id";

/// An authenticated operator identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operator(pub String);

impl FromRequestParts<AppState> for Operator {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let id = parts
            .headers
            .get(OPERATOR_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty());

        let Some(id) = id else {
            tracing::warn!(uri = %parts.uri, "Operator request without identity");
            return Err(AppError::not_authenticated());
        };

        if !state.operators.is_operator(id) {
            tracing::warn!(operator = id, uri = %parts.uri, "Operator request denied");
            return Err(AppError::operator_required());
        }

        Ok(Operator(id.to_string()))
    }
}
