//! Canned provider for tests and offline runs (`AI_PROVIDER=mock`).

use super::{ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;

const DEFAULT_REPLY: &str = "Mock.";

/// Mock text provider that answers every prompt with a fixed reply.
pub struct MockTextProvider {
    reply: Option<String>,
}

impl MockTextProvider {
    pub fn new() -> Self {
        Self::with_reply(DEFAULT_REPLY)
    }

    pub fn with_reply(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    /// A provider whose every call fails like an upstream 5xx.
    pub fn failing() -> Self {
        Self { reply: None }
    }
}

impl Default for MockTextProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<ProviderResponse, ProviderError> {
        tracing::debug!(prompt_len = prompt.len(), "Mock provider answering");

        match &self.reply {
            Some(reply) => Ok(ProviderResponse {
                text: Some(reply.clone()),
            }),
            None => Err(ProviderError::ApiError(
                "Mock provider configured to fail".to_string(),
            )),
        }
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
