use crate::services::numeric::NumericError;
use crate::services::providers::ProviderError;
use axum::http::StatusCode;
use thiserror::Error;

/// Everything that can make a `/bfhl` request fail.
///
/// The client only ever sees the uniform failure body; the message is for
/// the server log.
#[derive(Debug, Error)]
pub enum BfhlError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Computation failed: {0}")]
    Numeric(#[from] NumericError),

    #[error("AI provider failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BfhlError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        BfhlError::InvalidRequest(msg.into())
    }

    /// Client and upstream faults are 400; a provider that was never
    /// configured, or a computation task that died, is our fault and is 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            BfhlError::InvalidRequest(_) | BfhlError::Numeric(_) => StatusCode::BAD_REQUEST,
            BfhlError::Provider(ProviderError::NotConfigured(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            BfhlError::Provider(_) => StatusCode::BAD_REQUEST,
            BfhlError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Label used for the `outcome` metric dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            BfhlError::InvalidRequest(_) => "invalid_request",
            BfhlError::Numeric(NumericError::EmptyInput) => "empty_input",
            BfhlError::Numeric(NumericError::Overflow) => "overflow",
            BfhlError::Provider(ProviderError::NotConfigured(_)) => "not_configured",
            BfhlError::Provider(_) => "provider_error",
            BfhlError::Internal(_) => "internal",
        }
    }
}
