//! Operator API
//!
//! Every handler takes an [`Operator`](crate::auth::Operator) argument, so
//! callers outside the allow-list are rejected before any store access.

mod catalog;
mod orders;
mod stats;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().nest("/api/admin", admin_routes())
}

fn admin_routes() -> Router<AppState> {
    Router::new()
        // Orders
        .route("/orders", get(orders::list_new))
        .route("/orders/archive", get(orders::list_archive))
        .route("/orders/{id}", get(orders::get_detail))
        .route("/orders/{id}/complete", post(orders::complete))
        // Stats
        .route("/stats", get(stats::summary))
        .route("/stats/day", get(stats::day))
        // Catalog
        .route("/categories", post(catalog::create_category))
        .route("/categories/{id}", delete(catalog::delete_category))
        .route("/products", post(catalog::create_product))
        .route(
            "/products/{id}",
            put(catalog::update_product).delete(catalog::delete_product),
        )
}
