//! Operator notifications
//!
//! Delivery is best-effort: it runs after the order has committed, each
//! recipient is tried independently, and failures are only logged.

mod log;
mod telegram;

pub use log::LogChannel;
pub use telegram::TelegramChannel;

use async_trait::async_trait;
use futures::future::join_all;
use rust_decimal::Decimal;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::orders::PlacedOrder;

/// What operators are told about a new order
#[derive(Debug, Clone, PartialEq)]
pub struct OrderNotice {
    pub order_id: i64,
    pub customer_name: String,
    pub total: Decimal,
}

impl From<&PlacedOrder> for OrderNotice {
    fn from(order: &PlacedOrder) -> Self {
        Self {
            order_id: order.order_id,
            customer_name: order.customer_name.clone(),
            total: order.total,
        }
    }
}

impl OrderNotice {
    /// Message body in Telegram HTML markup
    pub fn to_html(&self) -> String {
        format!(
            "<b>New order #{}</b>\nCustomer: {}\nTotal: {:.2}\n\nOpen the new orders list to process it.",
            self.order_id,
            escape_html(&self.customer_name),
            self.total
        )
    }
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
    out
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("rejected by channel: {0}")]
    Rejected(String),
}

/// Delivery transport for a single recipient
#[async_trait]
pub trait NotificationChannel: Send + Sync {
    fn name(&self) -> &'static str;

    async fn deliver(&self, recipient: &str, notice: &OrderNotice) -> Result<(), NotifyError>;
}

/// Outcome of one fan-out
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotifyReport {
    pub delivered: usize,
    /// Recipients whose delivery failed
    pub failed: Vec<String>,
}

/// Fans a notice out to every configured operator
#[derive(Clone)]
pub struct Notifier {
    channel: Arc<dyn NotificationChannel>,
    recipients: Arc<[String]>,
}

impl Notifier {
    pub fn new(channel: Arc<dyn NotificationChannel>, recipients: Vec<String>) -> Self {
        Self {
            channel,
            recipients: recipients.into(),
        }
    }

    pub fn recipients(&self) -> &[String] {
        &self.recipients
    }

    /// Deliver to all recipients concurrently. Never fails.
    pub async fn notify_order_placed(&self, notice: &OrderNotice) -> NotifyReport {
        let deliveries = self.recipients.iter().map(|recipient| async move {
            let result = self.channel.deliver(recipient, notice).await;
            (recipient, result)
        });

        let mut report = NotifyReport::default();
        for (recipient, result) in join_all(deliveries).await {
            match result {
                Ok(()) => report.delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        channel = self.channel.name(),
                        recipient = %recipient,
                        order_id = notice.order_id,
                        error = %e,
                        "Order notification failed"
                    );
                    report.failed.push(recipient.clone());
                }
            }
        }

        tracing::debug!(
            order_id = notice.order_id,
            delivered = report.delivered,
            failed = report.failed.len(),
            "Order notification fan-out finished"
        );
        report
    }

    /// Run the fan-out on a detached task.
    ///
    /// The task outlives the request that placed the order, so a client
    /// disconnect cannot cancel it. Dropping the handle is fine.
    pub fn dispatch(&self, notice: OrderNotice) -> JoinHandle<NotifyReport> {
        let notifier = self.clone();
        tokio::spawn(async move { notifier.notify_order_placed(&notice).await })
    }
}
