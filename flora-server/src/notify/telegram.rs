//! Telegram Bot API channel (plain REST, no SDK dependency)

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use super::{NotificationChannel, NotifyError, OrderNotice};

const DEFAULT_API_BASE: &str = "https://api.telegram.org";

/// Subset of the Bot API response envelope
#[derive(Debug, Deserialize)]
struct BotApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

pub struct TelegramChannel {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

impl TelegramChannel {
    pub fn new(token: impl Into<String>, timeout: Duration) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            token: token.into(),
        })
    }

    /// Point the channel at another Bot API server
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", self.api_base, self.token)
    }
}

#[async_trait]
impl NotificationChannel for TelegramChannel {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn deliver(&self, recipient: &str, notice: &OrderNotice) -> Result<(), NotifyError> {
        let resp: BotApiResponse = self
            .client
            .post(self.send_message_url())
            .json(&serde_json::json!({
                "chat_id": recipient,
                "text": notice.to_html(),
                "parse_mode": "HTML",
            }))
            .send()
            .await?
            .json()
            .await?;

        if !resp.ok {
            return Err(NotifyError::Rejected(
                resp.description.unwrap_or_else(|| "unknown error".into()),
            ));
        }

        tracing::info!(recipient = recipient, order_id = notice.order_id, "Order notification sent");
        Ok(())
    }
}
