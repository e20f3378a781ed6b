//! HTTP API
//!
//! - `/health`
//! - `/api/products`, `/api/categories`: public catalog reads
//! - `/api/orders`: checkout
//! - `/api/admin/*`: operator surface (allow-list)

pub mod admin;
pub mod catalog;
pub mod health;
pub mod orders;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the combined router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(catalog::router())
        .merge(orders::router())
        .merge(admin::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
