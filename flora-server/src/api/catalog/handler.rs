//! Catalog API Handlers

use axum::extract::{Path, State};
use shared::error::ApiResponse;
use shared::models::{Category, Product};

use crate::error::ServiceResult;
use crate::state::AppState;

/// GET /api/products - all products, by id
pub async fn list_products(State(state): State<AppState>) -> ServiceResult<ApiResponse<Vec<Product>>> {
    let products = state.store.list_products().await?;
    Ok(ApiResponse::success(products))
}

/// GET /api/products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServiceResult<ApiResponse<Product>> {
    let product = state.store.get_product(id).await?;
    Ok(ApiResponse::success(product))
}

/// GET /api/categories - all categories, by id
pub async fn list_categories(
    State(state): State<AppState>,
) -> ServiceResult<ApiResponse<Vec<Category>>> {
    let categories = state.store.list_categories().await?;
    Ok(ApiResponse::success(categories))
}
