//! Data models
//!
//! Shared between flora-server and storefront/operator clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (Postgres BIGINT identity columns).

pub mod category;
pub mod order;
pub mod product;
pub mod stats;

// Re-exports
pub use category::*;
pub use order::*;
pub use product::*;
pub use stats::*;
