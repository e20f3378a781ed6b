//! Shared types for the Flora flower shop
//!
//! Domain models, wire DTOs and the unified error system used by
//! flora-server and its clients.

pub mod error;
pub mod models;
pub mod request;
pub mod response;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};
