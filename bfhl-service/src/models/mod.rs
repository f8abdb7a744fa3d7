//! Transient request and response shapes for the BFHL endpoint.

pub mod request;
pub mod response;

pub use request::{BfhlRequest, Operation};
pub use response::{BfhlData, BfhlResponse};
