//! One-word oracle: asks the text provider a question and normalizes the
//! free-form reply to a single token.

use std::sync::Arc;

use crate::error::AppError;
use crate::services::providers::TextProvider;

/// Substituted when the provider's reply contains no token at all.
const EMPTY_REPLY_FALLBACK: &str = "Unknown";

pub struct Oracle {
    provider: Arc<dyn TextProvider>,
}

impl Oracle {
    pub fn new(provider: Arc<dyn TextProvider>) -> Self {
        Self { provider }
    }

    /// Ask a question, expecting a one-word answer.
    ///
    /// The reply is trimmed and cut at the first whitespace boundary; models
    /// often append explanation despite the prompt's instruction.
    pub async fn ask(&self, question: &str) -> Result<String, AppError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AppError::BadRequest(
                "AI question must be a non-empty string".to_string(),
            ));
        }

        let prompt = format!(
            "Answer this question in exactly one word only, no explanation: \"{question}\""
        );

        let reply = self.provider.generate(&prompt).await?;

        let token = reply.split_whitespace().next().unwrap_or_default();
        if token.is_empty() {
            Ok(EMPTY_REPLY_FALLBACK.to_string())
        } else {
            Ok(token.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::MockTextProvider;

    fn oracle_with_reply(reply: &str) -> Oracle {
        Oracle::new(Arc::new(MockTextProvider::new(reply)))
    }

    #[tokio::test]
    async fn keeps_only_the_first_token() {
        let oracle = oracle_with_reply("  Paris, the capital of France.\n");
        let answer = oracle.ask("What is the capital of France?").await.unwrap();
        assert_eq!(answer, "Paris,");
    }

    #[tokio::test]
    async fn single_word_reply_passes_through() {
        let oracle = oracle_with_reply("Paris");
        let answer = oracle.ask("Capital of France?").await.unwrap();
        assert_eq!(answer, "Paris");
    }

    #[tokio::test]
    async fn empty_reply_falls_back_to_unknown() {
        let oracle = oracle_with_reply("   \n\t ");
        let answer = oracle.ask("Anything?").await.unwrap();
        assert_eq!(answer, "Unknown");
    }

    #[tokio::test]
    async fn blank_question_is_a_bad_request() {
        let oracle = oracle_with_reply("Paris");
        let err = oracle.ask("   ").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn unconfigured_provider_surfaces_a_config_error() {
        let oracle = Oracle::new(Arc::new(MockTextProvider::unconfigured()));
        let err = oracle.ask("Capital of France?").await.unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
    }
}
