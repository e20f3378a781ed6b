//! Operator order handlers

use axum::extract::{Path, State};
use shared::error::ApiResponse;
use shared::models::{Order, OrderDetail, OrderStatus};

use crate::auth::Operator;
use crate::db::ARCHIVE_LIMIT;
use crate::error::ServiceResult;
use crate::state::AppState;

/// GET /api/admin/orders - orders awaiting fulfillment, newest first
pub async fn list_new(
    _operator: Operator,
    State(state): State<AppState>,
) -> ServiceResult<ApiResponse<Vec<Order>>> {
    let orders = state.store.list_orders(OrderStatus::New, None).await?;
    Ok(ApiResponse::success(orders))
}

/// GET /api/admin/orders/archive - latest completed orders
pub async fn list_archive(
    _operator: Operator,
    State(state): State<AppState>,
) -> ServiceResult<ApiResponse<Vec<Order>>> {
    let orders = state
        .store
        .list_orders(OrderStatus::Completed, Some(ARCHIVE_LIMIT))
        .await?;
    Ok(ApiResponse::success(orders))
}

/// GET /api/admin/orders/{id}
pub async fn get_detail(
    _operator: Operator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServiceResult<ApiResponse<OrderDetail>> {
    let detail = state.store.get_order(id).await?;
    Ok(ApiResponse::success(detail))
}

/// POST /api/admin/orders/{id}/complete
pub async fn complete(
    Operator(operator): Operator,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ServiceResult<ApiResponse<Order>> {
    let order = state.store.complete_order(id).await?;
    tracing::info!(order_id = id, operator = %operator, "Order completed");
    Ok(ApiResponse::success(order))
}
