//! HTTP handlers for the BFHL service.

pub mod bfhl;
pub mod health;
pub mod metrics;

pub use bfhl::bfhl_handler;
pub use health::health_check;
pub use metrics::metrics_endpoint;
