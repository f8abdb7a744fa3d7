//! AI provider abstraction behind the `AI` operation.
//!
//! The handler only talks to `dyn TextProvider`, so the Gemini backend and
//! the canned mock are interchangeable.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Provider returned no usable text")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Result of a provider call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Generated text, if the provider produced any.
    pub text: Option<String>,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Short name used in logs and metric labels.
    fn name(&self) -> &'static str;

    /// Model identifier used in logs and metric labels.
    fn model(&self) -> &str;

    /// Send a single-turn prompt.
    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError>;

    /// Cheap check that the provider can be used at all.
    async fn health_check(&self) -> Result<(), ProviderError>;
}

/// First whitespace-delimited token of `reply` with one trailing period
/// removed. `None` when nothing is left.
pub fn first_word(reply: &str) -> Option<String> {
    let token = reply.split_whitespace().next()?;
    let word = token.strip_suffix('.').unwrap_or(token);
    if word.is_empty() {
        None
    } else {
        Some(word.to_string())
    }
}

/// Ask `provider` and reduce its reply to a single word.
pub async fn answer_in_one_word(
    provider: &dyn TextProvider,
    prompt: &str,
) -> Result<String, ProviderError> {
    let response = provider.generate(prompt).await?;
    response
        .text
        .as_deref()
        .and_then(first_word)
        .ok_or(ProviderError::EmptyResponse)
}
