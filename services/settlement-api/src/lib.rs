//! HTTP boundary for the settlement engine
//!
//! Validates request bodies, runs the settlement on a blocking worker and
//! renders the report as JSON.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod metrics;
pub mod models;

pub use config::Config;
pub use errors::{ApiError, Result};
