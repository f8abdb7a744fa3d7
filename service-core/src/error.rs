use thiserror::Error;

/// Infrastructure errors raised while loading configuration or starting a
/// service. Request-level failures are modelled by each service.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(anyhow::Error),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Internal server error: {0}")]
    InternalError(#[from] anyhow::Error),
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::ConfigError(anyhow::Error::new(err))
    }
}

impl AppError {
    pub fn config(msg: impl std::fmt::Display) -> Self {
        AppError::ConfigError(anyhow::anyhow!("{}", msg))
    }
}

impl From<AppError> for std::io::Error {
    fn from(err: AppError) -> Self {
        match err {
            AppError::IoError(e) => e,
            other => std::io::Error::other(other.to_string()),
        }
    }
}
