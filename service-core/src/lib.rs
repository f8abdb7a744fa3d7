//! service-core: Shared HTTP infrastructure for the bfhl workspace.
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
