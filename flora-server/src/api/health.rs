//! Health check endpoint

use axum::{Json, extract::State, http::StatusCode};
use shared::response::HealthStatus;

use crate::state::AppState;

/// GET /health - 200 when the store answers, 503 otherwise
pub async fn health_check(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    let (status, store) = match state.store.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check: store unavailable");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        status,
        Json(HealthStatus {
            status: if status.is_success() { "ok" } else { "degraded" }.to_string(),
            service: "flora-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            store: store.to_string(),
        }),
    )
}
