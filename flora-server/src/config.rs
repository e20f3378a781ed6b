//! Server configuration

use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Flora server configuration, loaded from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Environment: development | staging | production
    pub environment: String,
    /// HTTP listen port
    pub http_port: u16,
    /// PostgreSQL connection URL; `None` selects the in-memory store (development only)
    pub database_url: Option<String>,
    /// Connection pool size
    pub db_max_connections: u32,
    /// Telegram bot token; `None` logs notifications instead of sending them
    pub telegram_bot_token: Option<String>,
    /// Operator identities: notification recipients and the admin allow-list
    pub operator_ids: Vec<String>,
    /// Per-delivery timeout for outbound notifications
    pub notify_timeout: Duration,
    /// Default log filter level when RUST_LOG is unset
    pub log_level: String,
    /// Emit JSON log lines
    pub log_json: bool,
}

impl Config {
    /// Require an env var outside development; empty counts as unset.
    fn require_outside_dev(name: &str, environment: &str) -> Result<Option<String>, BoxError> {
        let val = std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        if val.is_none() && environment != "development" {
            return Err(format!("{name} must be set in {environment} environment").into());
        }
        Ok(val)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        Ok(Self {
            database_url: Self::require_outside_dev("DATABASE_URL", &environment)?,
            telegram_bot_token: Self::require_outside_dev("TELEGRAM_BOT_TOKEN", &environment)?,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8100),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(10),
            operator_ids: parse_operator_ids(&std::env::var("OPERATOR_IDS").unwrap_or_default()),
            notify_timeout: Duration::from_secs(
                std::env::var("NOTIFY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(10),
            ),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_json: std::env::var("LOG_JSON")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            environment,
        })
    }
}

/// Split a comma-separated id list, trimming entries and dropping blanks
pub fn parse_operator_ids(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(String::from)
        .collect()
}
