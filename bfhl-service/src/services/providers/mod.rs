//! Text-generation provider abstraction.
//!
//! A trait seam keeps the non-deterministic backend swappable: the real
//! Gemini provider in production, a deterministic mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("{0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Trait for text generation providers.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Submit one prompt and return the raw reply text.
    async fn generate(&self, prompt: &str) -> Result<String, ProviderError>;
}
