//! Mock provider implementation for testing.

use super::{ProviderError, TextProvider};
use async_trait::async_trait;

/// Deterministic stand-in for the Gemini backend.
pub struct MockTextProvider {
    reply: Option<String>,
}

impl MockTextProvider {
    /// Provider that answers every prompt with `reply`.
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: Some(reply.into()),
        }
    }

    /// Provider that behaves as if no credential were configured.
    pub fn unconfigured() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(&self, _prompt: &str) -> Result<String, ProviderError> {
        match &self.reply {
            Some(reply) => Ok(reply.clone()),
            None => Err(ProviderError::NotConfigured(
                "Mock text provider not configured".to_string(),
            )),
        }
    }
}
