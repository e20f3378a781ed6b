//! flora-server - backend of the Flora flower shop
//!
//! Serves the storefront catalog, takes orders without overselling stock,
//! notifies operators of new orders, and exposes the operator surface for
//! fulfillment and catalog upkeep.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod notify;
pub mod orders;
pub mod state;
pub mod utils;

pub use config::Config;
pub use state::AppState;
