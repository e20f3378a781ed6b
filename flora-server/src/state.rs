//! Application state

use std::sync::Arc;

use crate::auth::OperatorRegistry;
use crate::config::Config;
use crate::db::{MemoryShopStore, PgShopStore, ShopStore};
use crate::notify::{LogChannel, NotificationChannel, Notifier, TelegramChannel};
use crate::orders::OrderIntake;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ShopStore>,
    pub intake: OrderIntake,
    pub operators: Arc<OperatorRegistry>,
}

impl AppState {
    /// Wire state from already-built parts (tests use this directly)
    pub fn from_parts(store: Arc<dyn ShopStore>, notifier: Notifier) -> Self {
        let operators = Arc::new(OperatorRegistry::new(notifier.recipients().iter().cloned()));
        Self {
            intake: OrderIntake::new(store.clone(), notifier),
            store,
            operators,
        }
    }

    pub async fn new(config: &Config) -> Result<Self, BoxError> {
        let store: Arc<dyn ShopStore> = match &config.database_url {
            Some(url) => {
                let store = PgShopStore::connect(url, config.db_max_connections).await?;
                tracing::info!("Connected to PostgreSQL, migrations applied");
                Arc::new(store)
            }
            None => {
                tracing::warn!("DATABASE_URL not set, using in-memory store (data is not persisted)");
                Arc::new(MemoryShopStore::new())
            }
        };

        let channel: Arc<dyn NotificationChannel> = match &config.telegram_bot_token {
            Some(token) => Arc::new(TelegramChannel::new(token.clone(), config.notify_timeout)?),
            None => {
                tracing::warn!("TELEGRAM_BOT_TOKEN not set, order notifications go to the log");
                Arc::new(LogChannel)
            }
        };

        let notifier = Notifier::new(channel, config.operator_ids.clone());
        let state = Self::from_parts(store, notifier);
        if state.operators.is_empty() {
            tracing::warn!("OPERATOR_IDS is empty: no one is notified and operator routes are closed");
        }
        Ok(state)
    }
}
