//! Operator catalog handlers
//!
//! Bodies are taken as `Result<Json<_>, JsonRejection>` so a malformed payload
//! gets the JSON error body instead of axum's plain-text rejection.

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};
use shared::error::ApiResponse;
use shared::models::{Category, CategoryCreate, Product, ProductCreate, ProductUpdate};

use crate::auth::Operator;
use crate::error::ServiceResult;
use crate::state::AppState;

/// POST /api/admin/categories
pub async fn create_category(
    Operator(operator): Operator,
    State(state): State<AppState>,
    payload: Result<Json<CategoryCreate>, JsonRejection>,
) -> ServiceResult<ApiResponse<Category>> {
    let Json(payload) = payload?;
    let category = state.store.create_category(&payload).await?;
    tracing::info!(category_id = category.id, operator = %operator, "Category created");
    Ok(ApiResponse::success(category))
}

/// DELETE /api/admin/categories/{id} - refused while products reference it
pub async fn delete_category(
    Operator(operator): Operator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServiceResult<ApiResponse<()>> {
    state.store.delete_category(id).await?;
    tracing::info!(category_id = id, operator = %operator, "Category deleted");
    Ok(ApiResponse::ok())
}

/// POST /api/admin/products
pub async fn create_product(
    Operator(operator): Operator,
    State(state): State<AppState>,
    payload: Result<Json<ProductCreate>, JsonRejection>,
) -> ServiceResult<ApiResponse<Product>> {
    let Json(payload) = payload?;
    let product = state.store.create_product(&payload).await?;
    tracing::info!(product_id = product.id, operator = %operator, "Product created");
    Ok(ApiResponse::success(product))
}

/// PUT /api/admin/products/{id} - partial update (price, stock, title, ...)
pub async fn update_product(
    Operator(operator): Operator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    payload: Result<Json<ProductUpdate>, JsonRejection>,
) -> ServiceResult<ApiResponse<Product>> {
    let Json(payload) = payload?;
    let product = state.store.update_product(id, &payload).await?;
    tracing::info!(product_id = id, operator = %operator, "Product updated");
    Ok(ApiResponse::success(product))
}

/// DELETE /api/admin/products/{id}
pub async fn delete_product(
    Operator(operator): Operator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServiceResult<ApiResponse<()>> {
    state.store.delete_product(id).await?;
    tracing::info!(product_id = id, operator = %operator, "Product deleted");
    Ok(ApiResponse::ok())
}
