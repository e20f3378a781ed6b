//! Checkout Handler

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use shared::request::PlaceOrderRequest;
use shared::response::PlaceOrderResponse;

use crate::error::ServiceResult;
use crate::state::AppState;

/// POST /api/orders - place an order from a storefront cart
///
/// Body-parsing failures (missing fields, fractional or non-numeric
/// quantities) are answered in the same `{success: false}` shape as
/// validation errors.
pub async fn place_order(
    State(state): State<AppState>,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> ServiceResult<Json<PlaceOrderResponse>> {
    let Json(request) = payload?;

    let placement = state.intake.place_order(request).await?;
    // The notification task keeps running after the response is sent.
    let order = placement.order;
    Ok(Json(PlaceOrderResponse::new(order.order_id, order.total)))
}
