//! Order intake service

use std::sync::Arc;
use tokio::task::JoinHandle;

use shared::request::PlaceOrderRequest;

use super::{IntakeError, PlacedOrder, ValidatedOrder};
use crate::db::ShopStore;
use crate::notify::{Notifier, NotifyReport, OrderNotice};

/// Result of a successful checkout
#[derive(Debug)]
pub struct OrderPlacement {
    pub order: PlacedOrder,
    /// Operator fan-out, already running. Await it or drop it.
    pub notification: JoinHandle<NotifyReport>,
}

/// Validates, places and announces customer orders
#[derive(Clone)]
pub struct OrderIntake {
    store: Arc<dyn ShopStore>,
    notifier: Notifier,
}

impl OrderIntake {
    pub fn new(store: Arc<dyn ShopStore>, notifier: Notifier) -> Self {
        Self { store, notifier }
    }

    /// Place an order. Operators are notified only once it has committed.
    pub async fn place_order(
        &self,
        request: PlaceOrderRequest,
    ) -> Result<OrderPlacement, IntakeError> {
        let order = ValidatedOrder::try_from(request).inspect_err(|e| {
            tracing::warn!(reason = %e, "Order rejected");
        })?;

        let placed = self
            .store
            .place_order(&order)
            .await
            .inspect_err(|e| {
                if e.is_client_error() {
                    tracing::warn!(reason = %e, "Order rejected");
                } else {
                    tracing::error!(error = %e, "Order placement failed");
                }
            })?;

        tracing::info!(
            order_id = placed.order_id,
            lines = placed.items.len(),
            total = %placed.total,
            "Order placed"
        );

        let notification = self.notifier.dispatch(OrderNotice::from(&placed));
        Ok(OrderPlacement {
            order: placed,
            notification,
        })
    }
}
