//! Public catalog API

mod handler;

use axum::{Router, routing::get};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(handler::list_products))
        .route("/api/products/{id}", get(handler::get_product))
        .route("/api/categories", get(handler::list_categories))
}
