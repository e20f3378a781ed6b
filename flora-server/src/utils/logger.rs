//! Logging Infrastructure
//!
//! `RUST_LOG` wins when set; otherwise the filter is built from the
//! configured level for this crate plus request tracing from tower-http.

use tracing_subscriber::EnvFilter;

fn default_filter(log_level: &str) -> String {
    format!("flora_server={log_level},tower_http=info")
}

/// Initialize the global subscriber. Call once, at startup.
pub fn init_logger(log_level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(log_level)));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false);

    if json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}
