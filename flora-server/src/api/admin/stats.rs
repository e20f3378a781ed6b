//! Operator sales stats handlers

use axum::extract::{Query, State};
use chrono::Utc;
use shared::error::{ApiResponse, AppError, ErrorCode};
use shared::models::{DaySales, SalesStats};
use shared::request::StatsDayQuery;

use crate::auth::Operator;
use crate::error::ServiceResult;
use crate::orders::{parse_day, sales_stats};
use crate::state::AppState;

/// GET /api/admin/stats - today, yesterday, all time, active orders, stock
pub async fn summary(
    _operator: Operator,
    State(state): State<AppState>,
) -> ServiceResult<ApiResponse<SalesStats>> {
    let today = Utc::now().date_naive();
    let stats = sales_stats(state.store.as_ref(), today).await?;
    Ok(ApiResponse::success(stats))
}

/// GET /api/admin/stats/day?date=DD.MM.YYYY
pub async fn day(
    _operator: Operator,
    State(state): State<AppState>,
    Query(query): Query<StatsDayQuery>,
) -> ServiceResult<ApiResponse<DaySales>> {
    let date = parse_day(&query.date).ok_or_else(|| {
        AppError::with_message(ErrorCode::InvalidFormat, "Date must look like DD.MM.YYYY")
            .with_detail("date", query.date.clone())
    })?;
    let sales = state.store.completed_sales(Some(date)).await?;
    Ok(ApiResponse::success(DaySales { date, sales }))
}
