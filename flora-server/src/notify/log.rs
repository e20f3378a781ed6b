use async_trait::async_trait;

use super::{NotificationChannel, NotifyError, OrderNotice};

/// Writes notices to the log instead of sending them.
///
/// Selected when no bot token is configured (development).
pub struct LogChannel;

#[async_trait]
impl NotificationChannel for LogChannel {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn deliver(&self, recipient: &str, notice: &OrderNotice) -> Result<(), NotifyError> {
        tracing::info!(
            recipient = recipient,
            order_id = notice.order_id,
            customer = %notice.customer_name,
            total = %notice.total,
            "Order notification (log channel)"
        );
        Ok(())
    }
}
