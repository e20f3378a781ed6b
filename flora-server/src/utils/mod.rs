//! Utility module - logging and small helpers

pub mod logger;

pub use logger::init_logger;
